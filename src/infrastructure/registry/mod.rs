pub mod chain_registry;

pub use chain_registry::{ChainHandle, ChainRegistry};
