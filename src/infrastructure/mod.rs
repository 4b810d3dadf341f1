pub mod protocol;
pub mod provider;
pub mod registry;
