//! 请求间隔策略
//!
//! 每位教师抓取完成后停顿一次，避免触发数据源的访问限制。

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// 固定时长停顿
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        sleep(self.0).await;
    }
}

/// 不停顿（测试用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {}
}
