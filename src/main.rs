use anyhow::Result;
use faculty_publications::services::FixedDelay;
use faculty_publications::{logger, App, Config, ScholarClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::load()?;

    let source = Arc::new(ScholarClient::new(&config)?);
    let pacer = Box::new(FixedDelay::from_millis(config.request_delay_ms));

    // 初始化并运行应用
    App::new(config, source, pacer).run().await?;

    Ok(())
}
