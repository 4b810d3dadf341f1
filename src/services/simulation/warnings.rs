use crate::models::domain::AssetChange;
use crate::utils::format::round_to;
use bigdecimal::BigDecimal;
use num_format::{Locale, ToFormattedString};

pub const HIGH_GAS_USAGE: u64 = 1_000_000;
pub const HIGH_COST_USD: u32 = 10;
pub const EXTREME_COST_USD: u32 = 50;

pub const FAILURE_WARNING: &str = "⚠️ Transaction will likely FAIL - Do not execute";
pub const EXTREME_COST_WARNING: &str = "🚫 EXTREMELY HIGH GAS COST - Verify transaction details";
pub const NO_TRANSFERS_WARNING: &str = "ℹ️ No asset transfers detected";

/// 根据汇总结果生成风险提示，顺序固定，可同时出现多条。比较均为严格大于
pub fn generate_warnings(
    success: bool,
    gas_used: u64,
    gas_cost_usd: &BigDecimal,
    asset_changes: &[AssetChange],
) -> Vec<String> {
    let mut warnings = Vec::new();

    if !success {
        warnings.push(FAILURE_WARNING.to_string());
    }

    if gas_used > HIGH_GAS_USAGE {
        warnings.push(format!(
            "⚠️ Very high gas usage: {} gas",
            gas_used.to_formatted_string(&Locale::en)
        ));
    }

    if *gas_cost_usd > BigDecimal::from(HIGH_COST_USD) {
        warnings.push(format!("⚠️ High gas cost: ${}", round_to(gas_cost_usd, 2)));
    }

    if *gas_cost_usd > BigDecimal::from(EXTREME_COST_USD) {
        warnings.push(EXTREME_COST_WARNING.to_string());
    }

    if asset_changes.is_empty() {
        warnings.push(NO_TRANSFERS_WARNING.to_string());
    }

    warnings
}
