pub mod asset_change;
pub mod chain;
pub mod simulation;

pub use asset_change::{AssetChange, AssetType, ChangeType};
pub use chain::ChainConfig;
pub use simulation::{RawSimulationRequest, SimulationRequest, SimulationResult};
