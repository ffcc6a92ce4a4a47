//! 程序配置
//!
//! 所有常量集中在 [`Config`] 中，由入口显式传入 `App`。
//! 工作目录下存在 `faculty_publications.toml` 时，其中的字段覆盖默认值。

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 可选配置文件名
pub const CONFIG_FILE_NAME: &str = "faculty_publications.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 要查找的表格文件名
    pub input_filename: String,
    /// 是否递归搜索子目录
    pub search_subfolders: bool,
    /// 搜索起点目录
    pub search_root: PathBuf,
    /// 输出目录
    pub output_dir: PathBuf,
    /// 输出文件名
    pub output_filename: String,
    /// 每位教师保留的论文数量
    pub papers_per_faculty: usize,
    /// 两位教师之间的固定停顿（毫秒）
    pub request_delay_ms: u64,
    // --- Google Scholar 配置 ---
    pub scholar_base_url: String,
    pub request_timeout_secs: u64,
    /// 每位作者最多翻页数（每页 100 条）
    pub max_publication_pages: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_filename: "Google Scholar and ORCID Data.xlsx".to_string(),
            search_subfolders: true,
            search_root: PathBuf::from("."),
            output_dir: PathBuf::from("output"),
            output_filename: "faculty_publications.json".to_string(),
            papers_per_faculty: 5,
            request_delay_ms: 2000,
            scholar_base_url: "https://scholar.google.com".to_string(),
            request_timeout_secs: 30,
            max_publication_pages: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl Config {
    /// 加载配置：工作目录下有配置文件则读取，否则使用默认值
    pub fn load() -> AppResult<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 从指定 TOML 文件读取配置，缺失字段取默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config_failed(path, e))?;
        Self::from_toml_str(&content).map_err(|e| AppError::config_failed(path, e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 输出 JSON 文件的完整路径
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }
}
