use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::errors::error::AppError;
use crate::infrastructure::registry::ChainRegistry;
use crate::models::domain::RawSimulationRequest;
use crate::services::SimulationService;
use crate::{log_info, log_warn};

/// 应用启动与管理：构建链注册表和模拟服务。
/// 对外 API 层不在本 crate 内，`run` 只提供 JSON lines 形式的本地入口
pub struct Application {
    pub simulation_service: Arc<SimulationService>,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl Application {
    pub fn build(config: Config) -> Result<Self> {
        let registry = Arc::new(ChainRegistry::from_chain_configs(config.chain_configs()));
        if registry.is_empty() {
            log_warn!("⚠️ 没有任何可用的链，所有请求都会返回 not supported");
        }
        log_info!(
            "Simulation engine initialized with {} chains {:?} ({:?} queries)",
            registry.len(),
            registry.supported_chains(),
            config.simulator.query_mode
        );

        let simulation_service = Arc::new(SimulationService::new(
            registry,
            config.simulator.query_mode,
        ));
        Ok(Self { simulation_service })
    }

    /// stdin 每行一个请求，stdout 每行一个结果，直到输入结束
    pub async fn run(self) -> anyhow::Result<()> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        let handled = serve_lines(&self.simulation_service, stdin, stdout).await?;
        log_info!("✔️ 输入结束，共处理 {} 个请求", handled);
        Ok(())
    }
}

pub async fn serve_lines<R, W>(service: &SimulationService, input: R, mut output: W) -> Result<usize>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RawSimulationRequest>(line) {
            Ok(request) => serde_json::to_string(&service.simulate(&request).await)?,
            Err(e) => {
                log_warn!("无法解析请求: {}", e);
                serde_json::json!({ "success": false, "error": format!("Invalid request: {}", e) })
                    .to_string()
            }
        };

        output.write_all(response.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        handled += 1;
    }

    Ok(handled)
}
