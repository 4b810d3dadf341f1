use config::ConfigError;
use ethers_providers::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// 链未注册，或注册时 RPC 地址为空
    #[error("Chain {0} not supported")]
    UnsupportedChain(u64),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid numeric encoding for `{field}`: {value:?}")]
    InvalidNumericEncoding { field: &'static str, value: String },

    #[error("Invalid call data: {0}")]
    InvalidCallData(String),

    /// eth_call 失败（通常是合约 revert），保留节点返回的原始信息
    #[error("{0}")]
    CallReverted(String),

    #[error("Gas estimation failed: {0}")]
    GasEstimationFailed(String),

    #[error("Gas price fetch failed: {0}")]
    GasPriceFetchFailed(String),

    #[error("RPC provider error: {0}")]
    ProviderError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// 类型转换错误（U256→u64、单位换算等）
    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 内部不可预期错误（兜底）
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 在发起任何网络请求之前就终止请求的错误类别
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::UnsupportedChain(_)
                | AppError::InvalidAddress(_)
                | AppError::InvalidNumericEncoding { .. }
                | AppError::InvalidCallData(_)
        )
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
