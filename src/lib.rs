//! # Faculty Publications
//!
//! 读取教师名单表格，抓取每位教师在 Google Scholar 上最新的论文，
//! 输出一个扁平的 JSON 文件供静态网站展示
//!
//! ## 模块结构
//!
//! - `input/` - 定位表格文件、读取名单并校验列名
//! - `services/` - 提取用户标识、抓取并规范化论文、请求间隔
//! - `clients/` - 外部数据源接口及 Google Scholar 实现
//! - `orchestrator/` - 顺序批处理与输出写入
//! - `models/` - 名单、论文和输出记录

pub mod clients;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;

// 重新导出常用类型
pub use clients::{AuthorRecord, ScholarClient, ScholarSource};
pub use config::Config;
pub use error::{AppError, AppResult, SourceError};
pub use models::{FacultyRecord, OutputRecord, PublicationRecord, UserId, Year};
pub use orchestrator::{App, RunOutcome, RunSummary};
