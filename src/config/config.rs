use crate::models::domain::ChainConfig;
use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    pub logging: LoggingConfig,
    /// key 为链名（ethereum / bsc / ...），便于环境变量覆盖单个字段
    #[serde(default)]
    pub chains: HashMap<String, ChainSettings>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub query_mode: QueryMode,
}

/// 三个只读查询的发起方式。两种方式结果一致，concurrent 只是降低延迟
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    #[default]
    Sequential,
    Concurrent,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    pub dir: String,
    pub file_name: String,
    pub file_enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainSettings {
    pub chain_id: u64,
    /// 为空表示该链不启用
    #[serde(default)]
    pub rpc_url: String,
    pub native_symbol: Option<String>,
    pub usd_price: Option<f64>,
}

impl ChainSettings {
    pub fn to_chain_config(&self) -> ChainConfig {
        let mut chain = ChainConfig::new(self.chain_id, self.rpc_url.trim());
        if let Some(symbol) = self.native_symbol.as_deref().filter(|s| !s.trim().is_empty()) {
            chain = chain.with_native_symbol(symbol.trim());
        }
        if let Some(price) = self.usd_price {
            chain = chain.with_usd_price(price);
        }
        chain
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // SIMULATOR__CHAINS__ETHEREUM__RPC_URL=... 覆盖单个字段
            .add_source(Environment::with_prefix("SIMULATOR").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// 按 chain_id 排序，保证启动日志稳定
    pub fn chain_configs(&self) -> Vec<ChainConfig> {
        let mut chains: Vec<ChainConfig> =
            self.chains.values().map(ChainSettings::to_chain_config).collect();
        chains.sort_by_key(|c| c.chain_id);
        chains
    }
}
