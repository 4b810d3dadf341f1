//! 三个 RPC 步骤各自的失败处理策略。
//!
//! | 步骤            | 失败时                         | 是否写入 error            |
//! |-----------------|--------------------------------|---------------------------|
//! | eth_call        | success = false                | 是（最高优先级）          |
//! | estimate_gas    | gas_used = 21000               | 仅当 error 仍为空         |
//! | gas_price       | 20 gwei 参考价                 | 否                        |
use crate::errors::error::AppError;
use crate::infrastructure::protocol::constants::{BASE_TRANSFER_GAS, FALLBACK_GAS_PRICE_GWEI, GWEI};
use ethers_core::types::{Bytes, U256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStep {
    Call,
    EstimateGas,
    GasPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// 标记为失败并记录错误，后续步骤照常执行
    MarkFailed,
    /// 使用固定兜底值；error 为空时记录原因
    FallbackAndRecord,
    /// 静默使用固定兜底值
    Fallback,
}

impl SimulationStep {
    pub fn recovery(&self) -> Recovery {
        match self {
            SimulationStep::Call => Recovery::MarkFailed,
            SimulationStep::EstimateGas => Recovery::FallbackAndRecord,
            SimulationStep::GasPrice => Recovery::Fallback,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            SimulationStep::Call => "eth_call",
            SimulationStep::EstimateGas => "eth_estimateGas",
            SimulationStep::GasPrice => "eth_gasPrice",
        }
    }
}

pub fn fallback_gas_used() -> U256 {
    U256::from(BASE_TRANSFER_GAS)
}

pub fn fallback_gas_price() -> U256 {
    U256::from(FALLBACK_GAS_PRICE_GWEI) * U256::from(GWEI)
}

/// 三个查询的原始结果
#[derive(Debug)]
pub struct QueryResults {
    pub call: Result<Bytes, AppError>,
    pub gas_estimate: Result<U256, AppError>,
    pub gas_price: Result<U256, AppError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQueries {
    pub success: bool,
    pub gas_used: U256,
    pub gas_price: U256,
    pub error: Option<String>,
}

pub fn resolve(results: QueryResults) -> ResolvedQueries {
    let mut resolved = ResolvedQueries {
        success: true,
        gas_used: fallback_gas_used(),
        gas_price: fallback_gas_price(),
        error: None,
    };

    if let Err(e) = results.call {
        apply(SimulationStep::Call, &e, &mut resolved);
    }

    match results.gas_estimate {
        // 节点返回 0 同样按基础转账成本处理
        Ok(gas) if !gas.is_zero() => resolved.gas_used = gas,
        Ok(_) => {}
        Err(e) => apply(SimulationStep::EstimateGas, &e, &mut resolved),
    }

    match results.gas_price {
        Ok(price) => resolved.gas_price = price,
        Err(e) => apply(SimulationStep::GasPrice, &e, &mut resolved),
    }

    resolved
}

fn apply(step: SimulationStep, err: &AppError, resolved: &mut ResolvedQueries) {
    crate::log_warn!("{} 失败: {}", step.method(), err);

    match step.recovery() {
        Recovery::MarkFailed => {
            resolved.success = false;
            resolved.error = Some(step_message(step, err));
        }
        Recovery::FallbackAndRecord => {
            if resolved.error.is_none() {
                resolved.error = Some(step_message(step, err));
            }
        }
        Recovery::Fallback => {}
    }
}

/// 统一各步骤的错误文案，适配层若返回了其他类型的错误也归一到对应类别
fn step_message(step: SimulationStep, err: &AppError) -> String {
    match (step, err) {
        (SimulationStep::Call, AppError::CallReverted(msg)) => msg.clone(),
        (SimulationStep::Call, _)
        | (SimulationStep::EstimateGas, AppError::GasEstimationFailed(_))
        | (SimulationStep::GasPrice, AppError::GasPriceFetchFailed(_)) => err.to_string(),
        (SimulationStep::EstimateGas, _) => AppError::GasEstimationFailed(err.to_string()).to_string(),
        (SimulationStep::GasPrice, _) => AppError::GasPriceFetchFailed(err.to_string()).to_string(),
    }
}
