use crate::errors::error::AppError;
use bigdecimal::{BigDecimal, RoundingMode};
use ethers_core::types::U256;
use serde::Serializer;
use std::str::FromStr;

/// 最小单位 → 展示单位（wei → ETH 传 18，wei → gwei 传 9），精确换算
pub fn to_display_units(value: U256, decimals: u32) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(&format!("{}e-{}", value, decimals))
        .map(|d| d.normalized())
        .map_err(|e| AppError::ConversionError(format!("{} 单位换算失败: {}", value, e)))
}

pub fn f64_to_bigdecimal(value: f64) -> Result<BigDecimal, AppError> {
    if !value.is_finite() {
        return Err(AppError::ConversionError(format!("非有限数值: {}", value)));
    }
    BigDecimal::from_str(&value.to_string())
        .map_err(|e| AppError::ConversionError(format!("f64({}) 转 BigDecimal 失败: {}", value, e)))
}

pub fn round_to(value: &BigDecimal, places: i64) -> BigDecimal {
    value.with_scale_round(places, RoundingMode::HalfEven)
}

/// U256 默认序列化为 hex，这里输出十进制字符串
pub fn serialize_u256_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}
