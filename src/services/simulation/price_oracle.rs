// 静态价格表，仅用于把 gas 成本换算成美元展示，不接行情
use crate::errors::error::AppError;
use crate::models::domain::ChainConfig;
use crate::utils::format::f64_to_bigdecimal;
use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 未收录的链按以太坊主网价格估算
pub const DEFAULT_USD_PRICE: f64 = 3000.0;

static NATIVE_USD_PRICES: Lazy<HashMap<u64, f64>> = Lazy::new(|| {
    HashMap::from([
        (1, 3000.0),     // Ethereum
        (10, 3000.0),    // Optimism
        (56, 600.0),     // BSC (BNB)
        (137, 1.0),      // Polygon
        (42161, 3000.0), // Arbitrum
        (8453, 3000.0),  // Base
        (43114, 40.0),   // Avalanche (AVAX)
    ])
});

pub fn native_usd_price(chain_id: u64) -> f64 {
    NATIVE_USD_PRICES
        .get(&chain_id)
        .copied()
        .unwrap_or(DEFAULT_USD_PRICE)
}

/// 原生币数量 × 链上配置的美元价格（未四舍五入）
pub fn to_usd(amount_native: &BigDecimal, chain: &ChainConfig) -> Result<BigDecimal, AppError> {
    Ok(amount_native * f64_to_bigdecimal(chain.usd_price)?)
}
