use serde::Serialize;

/// 单条链的静态配置，进程启动时构建，之后只读
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    pub native_symbol: Option<String>,
    /// 原生币的近似美元价格，仅用于展示 gas 成本
    pub usd_price: f64,
}

impl ChainConfig {
    pub fn new(chain_id: u64, rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id,
            rpc_url: rpc_url.into(),
            native_symbol: None,
            usd_price: crate::services::simulation::price_oracle::native_usd_price(chain_id),
        }
    }

    pub fn with_native_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.native_symbol = Some(symbol.into());
        self
    }

    pub fn with_usd_price(mut self, usd_price: f64) -> Self {
        self.usd_price = usd_price;
        self
    }

    /// 未配置时按链 ID 查内置表，兜底 ETH
    pub fn symbol(&self) -> &str {
        match &self.native_symbol {
            Some(symbol) => symbol.as_str(),
            None => default_native_symbol(self.chain_id),
        }
    }
}

fn default_native_symbol(chain_id: u64) -> &'static str {
    match chain_id {
        56 => "BNB",
        137 => "POL",
        43114 => "AVAX",
        _ => "ETH",
    }
}
