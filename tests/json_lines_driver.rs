use async_trait::async_trait;
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Bytes, U256};
use std::sync::Arc;
use tx_simulator::SimulationService;
use tx_simulator::config::{Config, QueryMode};
use tx_simulator::errors::AppError;
use tx_simulator::infrastructure::provider::ProviderTrait;
use tx_simulator::infrastructure::registry::ChainRegistry;
use tx_simulator::models::domain::ChainConfig;
use tx_simulator::startup::Application;
use tx_simulator::startup::startup::serve_lines;

struct StaticProvider;

#[async_trait]
impl ProviderTrait for StaticProvider {
    async fn call(&self, _tx: &TypedTransaction) -> Result<Bytes, AppError> {
        Ok(Bytes::default())
    }

    async fn estimate_gas(&self, _tx: &TypedTransaction) -> Result<U256, AppError> {
        Ok(U256::from(21_000u64))
    }

    async fn get_gas_price(&self) -> Result<U256, AppError> {
        Ok(U256::from(10_000_000_000u64))
    }
}

fn service() -> SimulationService {
    let registry = ChainRegistry::default()
        .with_chain(ChainConfig::new(8453, "mock://base"), Arc::new(StaticProvider));
    SimulationService::new(Arc::new(registry), QueryMode::Concurrent)
}

#[tokio::test]
async fn answers_one_line_per_request() {
    let input = concat!(
        r#"{"chain_id":8453,"from_address":"0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0","to_address":"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48","value":"0x989680"}"#,
        "\n\n",
        r#"{"chain_id":999,"from_address":"0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0","to_address":"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"}"#,
        "\n",
        "not json\n",
    );
    let mut output: Vec<u8> = Vec::new();

    let handled = serve_lines(&service(), input.as_bytes(), &mut output)
        .await
        .unwrap();
    assert_eq!(handled, 3);

    let lines: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0]["success"], true);
    assert_eq!(lines[0]["chain_id"], 8453);
    assert_eq!(lines[0]["asset_changes"][0]["amount_wei"], "10000000");

    assert_eq!(lines[1]["success"], false);
    assert_eq!(lines[1]["error"], "Chain 999 not supported");

    assert_eq!(lines[2]["success"], false);
    assert!(lines[2]["error"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn application_registers_only_configured_endpoints() {
    let config = Config::from_toml_str(
        r#"
        [logging]
        level = "warn"
        dir = "logs"
        file_name = "test.log"
        file_enabled = false

        [chains.ethereum]
        chain_id = 1
        rpc_url = "https://eth.llamarpc.com"

        [chains.bsc]
        chain_id = 56
        rpc_url = ""
        "#,
    )
    .unwrap();

    let app = Application::build(config).unwrap();
    assert_eq!(app.simulation_service.registry().supported_chains(), vec![1]);
}
