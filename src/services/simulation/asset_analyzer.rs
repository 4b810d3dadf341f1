use crate::errors::error::AppError;
use crate::infrastructure::protocol::constants::NATIVE_DECIMALS;
use crate::models::domain::{AssetChange, SimulationRequest};
use crate::utils::format::to_display_units;
use std::collections::HashMap;
use std::sync::Arc;

/// 按函数选择器解析 call data 中的资产变动（ERC-20 / ERC-721 transfer 等）
pub trait CallDataDecoder: Send + Sync {
    fn name(&self) -> &'static str;

    fn decode(&self, request: &SimulationRequest) -> Vec<AssetChange>;
}

/// 选择器 → 解码器。默认为空：当前版本不解析 token 转账
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: HashMap<[u8; 4], Arc<dyn CallDataDecoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, selector: [u8; 4], decoder: Arc<dyn CallDataDecoder>) -> Self {
        self.decoders.insert(selector, decoder);
        self
    }

    pub fn lookup(&self, selector: &[u8; 4]) -> Option<&Arc<dyn CallDataDecoder>> {
        self.decoders.get(selector)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

#[derive(Clone, Default)]
pub struct AssetChangeAnalyzer {
    decoders: DecoderRegistry,
}

impl AssetChangeAnalyzer {
    pub fn new(decoders: DecoderRegistry) -> Self {
        Self { decoders }
    }

    /// value > 0 时产生一条原生币转账；call data 交给已注册的解码器
    pub fn analyze(&self, request: &SimulationRequest, symbol: &str) -> Result<Vec<AssetChange>, AppError> {
        let mut changes = Vec::new();

        if !request.value.is_zero() {
            changes.push(AssetChange::native_transfer(
                request.from,
                request.to,
                request.value,
                to_display_units(request.value, NATIVE_DECIMALS)?,
                symbol,
            ));
        }

        if let Some(decoder) = request.selector().and_then(|s| self.decoders.lookup(&s)) {
            let decoded = decoder.decode(request);
            crate::log_debug!("decoder {} 解析出 {} 条资产变动", decoder.name(), decoded.len());
            changes.extend(decoded);
        }

        Ok(changes)
    }
}
