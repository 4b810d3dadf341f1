// services/simulation/simulation_service.rs

use crate::config::QueryMode;
use crate::errors::error::AppError;
use crate::infrastructure::protocol::constants::{
    BASE_TRANSFER_GAS, GWEI_DECIMALS, NATIVE_DECIMALS, SIMULATION_METHOD,
};
use crate::infrastructure::provider::ProviderTrait;
use crate::infrastructure::registry::ChainRegistry;
use crate::models::domain::{RawSimulationRequest, SimulationResult};
use crate::services::simulation::asset_analyzer::{AssetChangeAnalyzer, DecoderRegistry};
use crate::services::simulation::fallback::{self, QueryResults};
use crate::services::simulation::normalizer::normalize;
use crate::services::simulation::price_oracle;
use crate::services::simulation::warnings::generate_warnings;
use crate::utils::convert::u256_to_u64;
use crate::utils::format::{round_to, to_display_units};
use crate::{log_error, log_info, log_warn};
use bigdecimal::BigDecimal;
use chrono::Utc;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// 交易结果预测：不广播，只通过只读 RPC 预估成功与否、gas 成本和资产变动。
///
/// `simulate` 永远返回完整的 [`SimulationResult`]，任何错误都折叠进结果里。
pub struct SimulationService {
    registry: Arc<ChainRegistry>,
    analyzer: AssetChangeAnalyzer,
    query_mode: QueryMode,
}

impl SimulationService {
    pub fn new(registry: Arc<ChainRegistry>, query_mode: QueryMode) -> Self {
        Self {
            registry,
            analyzer: AssetChangeAnalyzer::default(),
            query_mode,
        }
    }

    pub fn with_decoders(mut self, decoders: DecoderRegistry) -> Self {
        self.analyzer = AssetChangeAnalyzer::new(decoders);
        self
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    pub async fn simulate(&self, request: &RawSimulationRequest) -> SimulationResult {
        log_info!(
            "Simulating transaction on chain {}: {} -> {}",
            request.chain_id,
            request.from_address,
            request.to_address
        );

        let outcome = AssertUnwindSafe(self.try_simulate(request))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) if e.is_rejection() => {
                log_warn!("请求被拒绝 (chain {}): {}", request.chain_id, e);
                rejected(request.chain_id, e.to_string())
            }
            Ok(Err(e)) => {
                log_error!("Simulation error (chain {}): {}", request.chain_id, e);
                rejected(request.chain_id, format!("Simulation failed: {}", e))
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unexpected internal error".to_string());
                log_error!("Simulation panicked (chain {}): {}", request.chain_id, reason);
                rejected(request.chain_id, format!("Simulation failed: {}", reason))
            }
        }
    }

    async fn try_simulate(&self, raw: &RawSimulationRequest) -> Result<SimulationResult, AppError> {
        // 1. 先确认链已注册，再做参数校验
        let chain = self.registry.resolve(raw.chain_id)?;
        let request = normalize(raw)?;
        let payload = request.to_call_payload();

        // 2. 三个只读查询，各自独立容错
        let results = self.run_queries(chain.provider(), &payload).await;
        let resolved = fallback::resolve(results);
        tracing::debug!(
            chain_id = raw.chain_id,
            success = resolved.success,
            gas_used = %resolved.gas_used,
            gas_price = %resolved.gas_price,
            "queries resolved"
        );

        // 3. 成本换算
        let gas_used = u256_to_u64(resolved.gas_used)?;
        let gas_cost_wei = resolved
            .gas_used
            .checked_mul(resolved.gas_price)
            .ok_or_else(|| AppError::ConversionError("gas cost overflow".to_string()))?;
        let gas_cost_native = to_display_units(gas_cost_wei, NATIVE_DECIMALS)?;
        let gas_cost_usd = round_to(
            &price_oracle::to_usd(&gas_cost_native, chain.config())?,
            4,
        );
        let gas_price_gwei = to_display_units(resolved.gas_price, GWEI_DECIMALS)?;

        // 4. 资产变动与风险提示
        let asset_changes = self.analyzer.analyze(&request, chain.config().symbol())?;
        let warnings = generate_warnings(resolved.success, gas_used, &gas_cost_usd, &asset_changes);

        Ok(SimulationResult {
            success: resolved.success,
            gas_used,
            gas_cost_native,
            gas_cost_usd,
            gas_price_gwei,
            error: resolved.error,
            asset_changes,
            warnings,
            chain_id: raw.chain_id,
            simulation_method: SIMULATION_METHOD.to_string(),
            timestamp: Utc::now(),
        })
    }

    async fn run_queries(&self, provider: &dyn ProviderTrait, payload: &TypedTransaction) -> QueryResults {
        match self.query_mode {
            QueryMode::Sequential => {
                let call = provider.call(payload).await;
                let gas_estimate = provider.estimate_gas(payload).await;
                let gas_price = provider.get_gas_price().await;
                QueryResults {
                    call,
                    gas_estimate,
                    gas_price,
                }
            }
            QueryMode::Concurrent => {
                let (call, gas_estimate, gas_price) = tokio::join!(
                    provider.call(payload),
                    provider.estimate_gas(payload),
                    provider.get_gas_price()
                );
                QueryResults {
                    call,
                    gas_estimate,
                    gas_price,
                }
            }
        }
    }
}

/// 未进入 RPC 阶段（或兜底捕获）的结果：所有字段都有确定值
///
/// gas_used 报基础转账的 21000，成本和 gas 价格报 0：没有可信的价格，不按 gas_used × price 计算
fn rejected(chain_id: u64, error: String) -> SimulationResult {
    let zero = BigDecimal::from(0);
    SimulationResult {
        success: false,
        gas_used: BASE_TRANSFER_GAS,
        gas_cost_native: zero.clone(),
        gas_cost_usd: zero.clone(),
        gas_price_gwei: zero.clone(),
        error: Some(error),
        asset_changes: Vec::new(),
        warnings: generate_warnings(false, BASE_TRANSFER_GAS, &zero, &[]),
        chain_id,
        simulation_method: SIMULATION_METHOD.to_string(),
        timestamp: Utc::now(),
    }
}
