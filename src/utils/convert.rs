use crate::errors::error::AppError;
use ethers_core::types::U256;

/// 解析数值字段：`0x` 前缀按 hex，否则按十进制。负数、空串、溢出均报错，不做静默兜底
pub fn parse_quantity(field: &'static str, raw: &str) -> Result<U256, AppError> {
    let invalid = || AppError::InvalidNumericEncoding {
        field,
        value: raw.to_string(),
    };

    let s = raw.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        return U256::from_str_radix(hex, 16).map_err(|_| invalid());
    }

    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    U256::from_dec_str(s).map_err(|_| invalid())
}

/// 可选数值字段：None 或空串都视为未提供
pub fn parse_optional_quantity(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<U256>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_quantity(field, s).map(Some),
    }
}

pub fn u256_to_u64(value: U256) -> Result<u64, AppError> {
    value
        .try_into()
        .map_err(|e| AppError::ConversionError(format!("U256({}) 超出u64范围: {}", value, e)))
}
