/// Google Scholar 客户端
///
/// 直接请求作者主页 `citations?user=...`，从 HTML 中解析作者信息和论文列表
use crate::clients::{AuthorRecord, ScholarSource};
use crate::config::Config;
use crate::error::SourceError;
use crate::models::{RawBib, RawPublication, UserId};
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// 主页每页最多显示的论文数
///
/// 请求带 `sortby=pubdate`，最新的论文排在最前，翻页上限只会截掉最旧的部分。
const PAGE_SIZE: usize = 100;

/// Google Scholar 客户端
pub struct ScholarClient {
    client: Client,
    base_url: String,
    max_pages: usize,
}

/// 单个主页解析结果
#[derive(Debug, Default)]
struct ProfilePage {
    name: Option<String>,
    affiliation: Option<String>,
    publications: Vec<RawPublication>,
}

impl ScholarClient {
    /// 创建新的 Scholar 客户端
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.scholar_base_url.trim_end_matches('/').to_string(),
            max_pages: config.max_publication_pages.max(1),
        })
    }

    fn page_url(&self, user_id: &UserId, cstart: usize) -> String {
        format!(
            "{}/citations?user={}&hl=en&cstart={}&pagesize={}&sortby=pubdate",
            self.base_url, user_id, cstart, PAGE_SIZE
        )
    }

    /// 获取并解析一页主页
    async fn get_page(&self, url: &str) -> Result<ProfilePage, SourceError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        if html.contains("gs_captcha") {
            return Err(SourceError::RateLimited {
                url: url.to_string(),
            });
        }

        parse_profile_page(&html)
    }
}

#[async_trait]
impl ScholarSource for ScholarClient {
    async fn resolve_author(&self, user_id: &UserId) -> Result<AuthorRecord, SourceError> {
        let page = self.get_page(&self.page_url(user_id, 0)).await?;

        let name = page.name.ok_or_else(|| SourceError::AuthorNotFound {
            user_id: user_id.to_string(),
        })?;

        Ok(AuthorRecord {
            user_id: user_id.clone(),
            name,
            affiliation: page.affiliation,
            first_page: Some(page.publications),
        })
    }

    async fn fetch_publications(
        &self,
        author: &AuthorRecord,
    ) -> Result<Vec<RawPublication>, SourceError> {
        let mut publications = Vec::new();
        let mut page_index = 0;
        let mut last_page_full = true;

        if let Some(rows) = &author.first_page {
            last_page_full = rows.len() >= PAGE_SIZE;
            publications.extend(rows.iter().cloned());
            page_index = 1;
        }

        while last_page_full && page_index < self.max_pages {
            let url = self.page_url(&author.user_id, page_index * PAGE_SIZE);
            let page = self.get_page(&url).await?;
            last_page_full = page.publications.len() >= PAGE_SIZE;
            publications.extend(page.publications);
            page_index += 1;
        }

        if last_page_full {
            warn!(
                "⚠️ {} 的论文达到 {} 页上限，只读取了最新的 {} 条",
                author.name,
                self.max_pages,
                publications.len()
            );
        }

        debug!("{} 共获取 {} 条论文", author.name, publications.len());
        Ok(publications)
    }
}

// ========== HTML 解析 ==========

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("{}: {:?}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

fn parse_profile_page(html: &str) -> Result<ProfilePage, SourceError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let name_sel = selector("#gsc_prf_in")?;
    let affiliation_sel = selector(".gsc_prf_il")?;
    let row_sel = selector("tr.gsc_a_tr")?;
    let title_sel = selector("a.gsc_a_at")?;
    let gray_sel = selector("div.gs_gray")?;
    let year_sel = selector("span.gsc_a_h")?;
    let citations_sel = selector("a.gsc_a_ac")?;
    // 期刊行末尾带有 ", 2020" 形式的年份
    let trailing_year =
        Regex::new(r",\s*\d{4}$").map_err(|e| SourceError::Parse(e.to_string()))?;

    let publications = root
        .select(&row_sel)
        .map(|row| {
            let venue = row
                .select(&gray_sel)
                .nth(1)
                .map(element_text)
                .map(|line| trailing_year.replace(&line, "").trim().to_string())
                .filter(|s| !s.is_empty());

            RawPublication {
                bib: RawBib {
                    title: first_text(row, &title_sel),
                    pub_year: first_text(row, &year_sel).map(Value::String),
                    venue,
                    ..Default::default()
                },
                num_citations: first_text(row, &citations_sel).map(Value::String),
            }
        })
        .collect();

    Ok(ProfilePage {
        name: first_text(root, &name_sel),
        affiliation: first_text(root, &affiliation_sel),
        publications,
    })
}
