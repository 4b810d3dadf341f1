use crate::utils::format::serialize_u256_decimal;
use bigdecimal::BigDecimal;
use ethers_core::types::{H160, U256};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Native,
    /// 预留：需要 call data 解码器
    FungibleToken,
    NonFungibleToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Transfer,
}

/// 预测的资产变动
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetChange {
    pub asset_type: AssetType,
    pub change_type: ChangeType,
    #[serde(rename = "from")]
    pub from_address: H160,
    #[serde(rename = "to")]
    pub to_address: H160,
    /// 最小单位（wei）
    #[serde(serialize_with = "serialize_u256_decimal")]
    pub amount_wei: U256,
    /// 展示单位（ETH/BNB/...）
    pub amount_native: BigDecimal,
    pub symbol: String,
}

impl AssetChange {
    pub fn native_transfer(
        from_address: H160,
        to_address: H160,
        amount_wei: U256,
        amount_native: BigDecimal,
        symbol: &str,
    ) -> Self {
        Self {
            asset_type: AssetType::Native,
            change_type: ChangeType::Transfer,
            from_address,
            to_address,
            amount_wei,
            amount_native,
            symbol: symbol.to_string(),
        }
    }
}
