use anyhow::Context;
use tx_simulator::config::Config;
use tx_simulator::log_info;
use tx_simulator::startup::Application;
use tx_simulator::utils::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    // 1. 加载配置
    let config = Config::load().context("Failed to load application configuration")?;

    // 2. 初始化日志（全局只需调用一次）
    init_logger(&config.logging);
    log_info!("Starting transaction simulator...");

    // 3. 构建应用实例
    let application = Application::build(config).context("Application building failed")?;

    // 4. 处理请求直到输入结束
    application
        .run()
        .await
        .context("Simulation driver failed during runtime")?;

    Ok(())
}
