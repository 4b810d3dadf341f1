use crate::errors::error::AppError;
use crate::models::domain::{RawSimulationRequest, SimulationRequest};
use crate::utils::check::{normalize_address, parse_call_data};
use crate::utils::convert::{parse_optional_quantity, parse_quantity};
use ethers_core::types::U256;

/// 原始请求 → 规范化请求。失败时不会发起任何网络请求。
///
/// - value 缺省为 0，data 缺省为空
/// - gas / gas_price 缺省时保持 None，由节点使用默认值
pub fn normalize(raw: &RawSimulationRequest) -> Result<SimulationRequest, AppError> {
    let from = normalize_address(&raw.from_address)?;
    let to = normalize_address(&raw.to_address)?;

    let value = match raw.value.as_deref() {
        Some(v) => parse_quantity("value", v)?,
        None => U256::zero(),
    };
    let data = parse_call_data(raw.data.as_deref())?;
    let gas = parse_optional_quantity("gas", raw.gas.as_deref())?;
    let gas_price = parse_optional_quantity("gas_price", raw.gas_price.as_deref())?;

    Ok(SimulationRequest {
        chain_id: raw.chain_id,
        from,
        to,
        value,
        data,
        gas,
        gas_price,
    })
}
