use crate::errors::error::AppError;
use crate::infrastructure::provider::{EthereumProvider, ProviderTrait};
use crate::models::domain::ChainConfig;
use crate::{log_error, log_info, log_warn};
use std::collections::HashMap;
use std::sync::Arc;

/// 已注册链：静态配置 + 对应的 RPC 适配器
#[derive(Clone)]
pub struct ChainHandle {
    config: ChainConfig,
    provider: Arc<dyn ProviderTrait>,
}

impl ChainHandle {
    pub fn new(config: ChainConfig, provider: Arc<dyn ProviderTrait>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn ProviderTrait {
        self.provider.as_ref()
    }
}

/// chain_id → RPC handle。启动时一次性构建，之后只读，通过 Arc 在请求间共享
#[derive(Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<u64, ChainHandle>,
}

impl ChainRegistry {
    /// 从链配置构建；rpc_url 为空或初始化失败的链不注册
    pub fn from_chain_configs(configs: impl IntoIterator<Item = ChainConfig>) -> Self {
        let mut registry = Self::default();
        for config in configs {
            if config.rpc_url.trim().is_empty() {
                log_warn!("chain {} 未配置 RPC 地址，跳过", config.chain_id);
                continue;
            }
            match EthereumProvider::new(config.chain_id, &config.rpc_url) {
                Ok(provider) => {
                    registry = registry.with_chain(config, Arc::new(provider));
                }
                Err(e) => log_error!("chain {} 初始化 RPC provider 失败: {}", config.chain_id, e),
            }
        }
        log_info!("链注册完成: {:?}", registry.supported_chains());
        registry
    }

    /// 只有 chain_id → URL 的映射时使用，其余字段取默认值
    pub fn from_rpc_urls(urls: impl IntoIterator<Item = (u64, String)>) -> Self {
        Self::from_chain_configs(urls.into_iter().map(|(id, url)| ChainConfig::new(id, url)))
    }

    /// 直接注册自定义 provider（测试或非 HTTP 传输）
    pub fn with_chain(mut self, config: ChainConfig, provider: Arc<dyn ProviderTrait>) -> Self {
        if config.rpc_url.trim().is_empty() {
            return self;
        }
        self.chains
            .insert(config.chain_id, ChainHandle::new(config, provider));
        self
    }

    pub fn resolve(&self, chain_id: u64) -> Result<&ChainHandle, AppError> {
        self.chains
            .get(&chain_id)
            .ok_or(AppError::UnsupportedChain(chain_id))
    }

    pub fn supported_chains(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.chains.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ethers_core::types::transaction::eip2718::TypedTransaction;
    use ethers_core::types::{Bytes, U256};

    struct NullProvider;

    #[async_trait]
    impl ProviderTrait for NullProvider {
        async fn call(&self, _tx: &TypedTransaction) -> Result<Bytes, AppError> {
            Ok(Bytes::default())
        }
        async fn estimate_gas(&self, _tx: &TypedTransaction) -> Result<U256, AppError> {
            Ok(U256::from(21_000u64))
        }
        async fn get_gas_price(&self) -> Result<U256, AppError> {
            Ok(U256::one())
        }
    }

    #[test]
    fn empty_endpoints_are_omitted() {
        let registry = ChainRegistry::from_rpc_urls([
            (1, "https://eth.llamarpc.com".to_string()),
            (56, String::new()),
            (137, "   ".to_string()),
        ]);
        assert_eq!(registry.supported_chains(), vec![1]);
        assert!(matches!(registry.resolve(56), Err(AppError::UnsupportedChain(56))));
        assert!(matches!(registry.resolve(137), Err(AppError::UnsupportedChain(137))));
    }

    #[test]
    fn invalid_endpoint_leaves_chain_unsupported() {
        let registry = ChainRegistry::from_rpc_urls([(10, "::not-a-url::".to_string())]);
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_chain_is_not_supported() {
        let registry = ChainRegistry::default()
            .with_chain(ChainConfig::new(1, "mock://1"), Arc::new(NullProvider));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve(1).unwrap().config().chain_id, 1);

        let err = registry.resolve(999).err().unwrap();
        assert_eq!(err.to_string(), "Chain 999 not supported");
    }

    #[test]
    fn custom_provider_with_empty_endpoint_is_ignored() {
        let registry = ChainRegistry::default().with_chain(ChainConfig::new(1, ""), Arc::new(NullProvider));
        assert!(registry.is_empty());
    }

    #[test]
    fn supported_chains_are_sorted() {
        let registry = ChainRegistry::default()
            .with_chain(ChainConfig::new(8453, "mock://base"), Arc::new(NullProvider))
            .with_chain(ChainConfig::new(1, "mock://eth"), Arc::new(NullProvider))
            .with_chain(ChainConfig::new(56, "mock://bsc"), Arc::new(NullProvider));
        assert_eq!(registry.supported_chains(), vec![1, 56, 8453]);
    }
}
