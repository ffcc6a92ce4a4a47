//! 外部学术数据源
//!
//! [`ScholarSource`] 是抓取器唯一依赖的接口，测试中用内存实现替换。

pub mod scholar_client;

pub use scholar_client::ScholarClient;

use crate::error::SourceError;
use crate::models::{RawPublication, UserId};
use async_trait::async_trait;

/// 数据源中解析出的作者
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRecord {
    pub user_id: UserId,
    pub name: String,
    pub affiliation: Option<String>,
    /// 解析作者时已经取得的第一页论文，抓取时从下一页继续
    pub first_page: Option<Vec<RawPublication>>,
}

#[async_trait]
pub trait ScholarSource: Send + Sync {
    /// 根据标识解析作者
    async fn resolve_author(&self, user_id: &UserId) -> Result<AuthorRecord, SourceError>;

    /// 获取作者的全部论文条目
    async fn fetch_publications(
        &self,
        author: &AuthorRecord,
    ) -> Result<Vec<RawPublication>, SourceError>;
}
