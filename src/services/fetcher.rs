//! 论文抓取服务 - 业务能力层
//!
//! 只负责"一位作者的最新论文"，不关心表格和输出

use crate::clients::ScholarSource;
use crate::error::SourceError;
use crate::models::{PublicationRecord, UserId};
use std::sync::Arc;
use tracing::{debug, warn};

/// 论文抓取服务
///
/// 职责：
/// - 通过数据源解析作者并获取论文列表
/// - 规范化每条论文的字段
/// - 按年份降序排序（同年保持数据源顺序），截取前 N 条
/// - 任何失败都只记录警告并返回空列表
pub struct PublicationFetcher {
    source: Arc<dyn ScholarSource>,
    max_papers: usize,
}

impl PublicationFetcher {
    pub fn new(source: Arc<dyn ScholarSource>, max_papers: usize) -> Self {
        Self { source, max_papers }
    }

    /// 获取作者最新的论文，失败时返回空列表
    pub async fn fetch(&self, user_id: &UserId) -> Vec<PublicationRecord> {
        match self.try_fetch(user_id).await {
            Ok(publications) => publications,
            Err(e) => {
                warn!("⚠️ 获取用户 {} 的论文失败: {}", user_id, e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, user_id: &UserId) -> Result<Vec<PublicationRecord>, SourceError> {
        let author = self.source.resolve_author(user_id).await?;
        let raw = self.source.fetch_publications(&author).await?;
        debug!(
            "{} ({}, {}) 共 {} 条原始论文",
            author.name,
            user_id,
            author.affiliation.as_deref().unwrap_or("-"),
            raw.len()
        );

        // 链接统一指向作者主页，避免单篇论文链接失效
        let link = user_id.profile_link();

        let mut publications: Vec<PublicationRecord> = raw
            .iter()
            .map(|publication| PublicationRecord::from_raw(publication, &link))
            .collect();

        publications.sort_by(PublicationRecord::cmp_year_desc);
        publications.truncate(self.max_papers);

        Ok(publications)
    }
}
