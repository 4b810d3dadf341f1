/// 最简单的原生币转账消耗（链的基础转账成本）
pub const BASE_TRANSFER_GAS: u64 = 21_000;

/// gas price 查询失败时使用的参考价（gwei）
pub const FALLBACK_GAS_PRICE_GWEI: u64 = 20;

pub const GWEI: u64 = 1_000_000_000;

/// 原生币精度（wei → ETH）
pub const NATIVE_DECIMALS: u32 = 18;

/// gas price 展示精度（wei → gwei）
pub const GWEI_DECIMALS: u32 = 9;

/// ERC-20 transfer(address,uint256) 函数选择器
pub const ERC20_TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

pub const SIMULATION_METHOD: &str = "eth_call";
