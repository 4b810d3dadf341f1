use crate::models::domain::asset_change::AssetChange;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Bytes, H160, TransactionRequest, U256};
use serde::{Deserialize, Serialize};

/// 外部传入的原始请求，字段都是未校验的字符串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSimulationRequest {
    pub chain_id: u64,
    pub from_address: String,
    pub to_address: String,
    /// hex（0x 前缀）或十进制字符串，缺省为 0
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub gas: Option<String>,
    #[serde(default)]
    pub gas_price: Option<String>,
}

impl RawSimulationRequest {
    pub fn new(chain_id: u64, from_address: impl Into<String>, to_address: impl Into<String>) -> Self {
        Self {
            chain_id,
            from_address: from_address.into(),
            to_address: to_address.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn gas(mut self, gas: impl Into<String>) -> Self {
        self.gas = Some(gas.into());
        self
    }

    pub fn gas_price(mut self, gas_price: impl Into<String>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }
}

/// 校验后的规范化请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub chain_id: u64,
    pub from: H160,
    pub to: H160,
    pub value: U256,
    pub data: Bytes,
    pub gas: Option<U256>,
    pub gas_price: Option<U256>,
}

impl SimulationRequest {
    /// 构造 eth_call / eth_estimateGas 的 payload。
    /// gas / gas_price 未提供时不填，交给节点自己的默认值。
    pub fn to_call_payload(&self) -> TypedTransaction {
        let mut req = TransactionRequest::new()
            .from(self.from)
            .to(self.to)
            .value(self.value)
            .data(self.data.clone());

        if let Some(gas) = self.gas {
            req = req.gas(gas);
        }
        if let Some(gas_price) = self.gas_price {
            req = req.gas_price(gas_price);
        }
        req.into()
    }

    pub fn selector(&self) -> Option<[u8; 4]> {
        let data = self.data.as_ref();
        if data.len() < 4 {
            return None;
        }
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&data[..4]);
        Some(selector)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub success: bool,
    pub gas_used: u64,
    pub gas_cost_native: BigDecimal,
    pub gas_cost_usd: BigDecimal,
    pub gas_price_gwei: BigDecimal,
    pub error: Option<String>,
    pub asset_changes: Vec<AssetChange>,
    pub warnings: Vec<String>,
    pub chain_id: u64,
    pub simulation_method: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::{NameOrAddress, transaction::eip2718::TypedTransaction};

    fn request(gas: Option<u64>, gas_price: Option<u64>) -> SimulationRequest {
        SimulationRequest {
            chain_id: 1,
            from: H160::repeat_byte(0x11),
            to: H160::repeat_byte(0x22),
            value: U256::from(7u64),
            data: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb, 0x00]),
            gas: gas.map(U256::from),
            gas_price: gas_price.map(U256::from),
        }
    }

    #[test]
    fn payload_omits_missing_gas_fields() {
        let payload = request(None, None).to_call_payload();
        assert_eq!(payload.gas(), None);
        assert_eq!(payload.gas_price(), None);
        assert_eq!(payload.value(), Some(&U256::from(7u64)));
        assert_eq!(payload.from(), Some(&H160::repeat_byte(0x11)));
        assert_eq!(
            payload.to(),
            Some(&NameOrAddress::Address(H160::repeat_byte(0x22)))
        );
    }

    #[test]
    fn payload_carries_explicit_gas_fields() {
        let payload = request(Some(50_000), Some(3_000_000_000)).to_call_payload();
        assert!(matches!(payload, TypedTransaction::Legacy(_)));
        assert_eq!(payload.gas(), Some(&U256::from(50_000u64)));
        assert_eq!(payload.gas_price(), Some(U256::from(3_000_000_000u64)));
    }

    #[test]
    fn selector_needs_four_bytes() {
        assert_eq!(request(None, None).selector(), Some([0xa9, 0x05, 0x9c, 0xbb]));

        let mut short = request(None, None);
        short.data = Bytes::from(vec![0xa9, 0x05]);
        assert_eq!(short.selector(), None);
    }

    #[test]
    fn raw_request_defaults_optional_fields() {
        let raw: RawSimulationRequest = serde_json::from_str(
            r#"{"chain_id":1,"from_address":"0xa","to_address":"0xb"}"#,
        )
        .unwrap();
        assert_eq!(raw, RawSimulationRequest::new(1, "0xa", "0xb"));
    }
}
