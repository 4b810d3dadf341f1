//! 交易结果预测：在不广播的前提下，通过节点的只读 RPC
//! 预估交易是否成功、gas 成本以及资产变动。

pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

pub use errors::AppError;
pub use models::domain::{AssetChange, RawSimulationRequest, SimulationRequest, SimulationResult};
pub use services::SimulationService;
