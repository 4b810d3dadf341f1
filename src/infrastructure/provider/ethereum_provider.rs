use crate::errors::error::AppError;
use crate::log_info;
use async_trait::async_trait;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Bytes, U256};
use ethers_providers::{Http, Middleware, Provider};
use std::sync::Arc;
use url::Url;

/// 只读 RPC 适配层：模拟执行、估算 gas、查询当前 gas price。
/// 三个方法互相独立，任何一个失败都不影响另外两个。
#[async_trait]
pub trait ProviderTrait: Send + Sync {
    async fn call(&self, tx: &TypedTransaction) -> Result<Bytes, AppError>;
    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, AppError>;
    async fn get_gas_price(&self) -> Result<U256, AppError>;
}

pub struct EthereumProvider {
    chain_id: u64,
    provider: Arc<Provider<Http>>,
}

impl EthereumProvider {
    pub fn new(chain_id: u64, rpc_url: &str) -> Result<Self, AppError> {
        let url = Url::parse(rpc_url.trim())
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", rpc_url, e)))?;
        let provider = Provider::<Http>::try_from(url.as_str())
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", rpc_url, e)))?;

        log_info!("chain {} RPC provider 已初始化: {}", chain_id, url.host_str().unwrap_or("-"));

        Ok(Self {
            chain_id,
            provider: Arc::new(provider),
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn get_provider(&self) -> Arc<Provider<Http>> {
        self.provider.clone()
    }
}

#[async_trait]
impl ProviderTrait for EthereumProvider {
    async fn call(&self, tx: &TypedTransaction) -> Result<Bytes, AppError> {
        // 基于 latest 状态执行，不上链
        self.get_provider()
            .call(tx, None)
            .await
            .map_err(|e| AppError::CallReverted(e.to_string()))
    }

    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, AppError> {
        self.get_provider()
            .estimate_gas(tx, None)
            .await
            .map_err(|e| AppError::GasEstimationFailed(e.to_string()))
    }

    async fn get_gas_price(&self) -> Result<U256, AppError> {
        self.get_provider()
            .get_gas_price()
            .await
            .map_err(|e| AppError::GasPriceFetchFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_endpoint() {
        let err = EthereumProvider::new(1, "not a url").err().expect("should fail");
        assert!(matches!(err, AppError::InvalidUrl(_)));
    }

    #[test]
    fn builds_http_provider_without_network() {
        let provider = EthereumProvider::new(10, "https://mainnet.optimism.io").expect("valid url");
        assert_eq!(provider.chain_id(), 10);
    }
}
