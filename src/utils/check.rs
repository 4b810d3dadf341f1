use crate::errors::error::AppError;
use ethers_core::types::{Address, Bytes};

const ADDRESS_LENGTH: usize = 42;

/// 地址形状校验：0x 前缀 + 42 个字符。不做 checksum / 大小写校验
pub fn is_address_shaped(addr: &str) -> bool {
    addr.starts_with("0x") && addr.len() == ADDRESS_LENGTH
}

/// 去掉首尾空白后校验形状并解析为 20 字节地址
pub fn normalize_address(raw: &str) -> Result<Address, AppError> {
    let addr = raw.trim();
    if !is_address_shaped(addr) {
        return Err(AppError::InvalidAddress(format!("Invalid address format: {}", addr)));
    }
    // 形状通过但含非 hex 字符时同样视为非法地址
    addr.parse::<Address>()
        .map_err(|_| AppError::InvalidAddress(format!("Invalid address format: {}", addr)))
}

/// call data 允许省略 0x 前缀；缺省/空串视为无 data
pub fn parse_call_data(raw: Option<&str>) -> Result<Bytes, AppError> {
    let data = raw.map(str::trim).unwrap_or_default();
    let body = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);

    hex::decode(body)
        .map(Bytes::from)
        .map_err(|e| AppError::InvalidCallData(format!("{} ({})", data, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_case_without_checksum() {
        // checksum 故意写错也接受
        let addr = normalize_address("0xa0B86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap();
        assert_eq!(
            format!("{:#x}", addr),
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        );
    }

    #[test]
    fn rejects_wrong_shape() {
        // 41 个字符
        assert!(normalize_address("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb").is_err());
        // 缺少 0x
        assert!(normalize_address("00A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").is_err());
        assert!(normalize_address("").is_err());
    }

    #[test]
    fn rejects_non_hex_body() {
        let err = normalize_address("0xZZb86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap_err();
        assert!(matches!(err, AppError::InvalidAddress(_)));
    }

    #[test]
    fn trims_whitespace() {
        assert!(normalize_address("  0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48 \n").is_ok());
    }

    #[test]
    fn call_data_prefix_is_optional() {
        assert_eq!(parse_call_data(Some("0xa9059cbb")).unwrap().to_vec(), vec![0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(parse_call_data(Some("a9059cbb")).unwrap().len(), 4);
        assert!(parse_call_data(Some("0x")).unwrap().is_empty());
        assert!(parse_call_data(None).unwrap().is_empty());
    }

    #[test]
    fn call_data_must_be_even_length_hex() {
        assert!(matches!(parse_call_data(Some("0xabc")), Err(AppError::InvalidCallData(_))));
        assert!(matches!(parse_call_data(Some("0xgg")), Err(AppError::InvalidCallData(_))));
    }
}
