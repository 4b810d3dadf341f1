pub mod asset_analyzer;
pub mod fallback;
pub mod normalizer;
pub mod price_oracle;
pub mod simulation_service;
pub mod warnings;

pub use asset_analyzer::{AssetChangeAnalyzer, CallDataDecoder, DecoderRegistry};
pub use simulation_service::SimulationService;
