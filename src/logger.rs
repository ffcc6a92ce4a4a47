//! 日志初始化

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化全局日志，默认级别 info，可通过 `RUST_LOG` 覆盖
///
/// 重复调用是安全的（测试中会多次调用）。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

/// 打印分隔横幅
pub fn banner(title: &str) {
    tracing::info!("{}", "=".repeat(60));
    tracing::info!("{}", title);
    tracing::info!("{}", "=".repeat(60));
}
