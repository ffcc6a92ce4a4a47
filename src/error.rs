use std::path::{Path, PathBuf};
use thiserror::Error;

/// 应用程序错误类型
///
/// 只用于会终止整次运行的错误（配置、输入、输出）。
/// 单个教师的抓取失败由 [`SourceError`] 表示，不会上升到这里。
#[derive(Debug, Error)]
pub enum AppError {
    /// 找不到输入表格
    #[error("在 {} 下未找到表格文件 '{filename}'", .root.display())]
    InputNotFound { filename: String, root: PathBuf },

    /// 表格缺少必需的列
    #[error("表格缺少必需的列: 实际列 {found:?}, 需要 {expected:?}")]
    MissingColumns {
        found: Vec<String>,
        expected: Vec<String>,
    },

    /// 表格无法读取或格式不受支持
    #[error("读取表格失败 ({}): {message}", .path.display())]
    SpreadsheetRead { path: PathBuf, message: String },

    /// 配置文件无法读取或解析
    #[error("配置文件错误 ({}): {source}", .path.display())]
    Config {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 输出文件写入失败
    #[error("写入输出文件失败 ({}): {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 外部学术数据源错误
///
/// 只在单个教师的处理范围内出现，由抓取器记录后吞掉。
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("请求 {url} 返回状态码 {status}")]
    Status { url: String, status: u16 },

    #[error("请求频率限制: {url}")]
    RateLimited { url: String },

    #[error("未找到作者: {user_id}")]
    AuthorNotFound { user_id: String },

    #[error("页面解析失败: {0}")]
    Parse(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建表格读取错误
    pub fn spreadsheet_failed(path: &Path, message: impl ToString) -> Self {
        AppError::SpreadsheetRead {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// 创建配置文件错误
    pub fn config_failed(
        path: &Path,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Config {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }

    /// 创建输出写入错误
    pub fn output_failed(
        path: &Path,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::OutputWrite {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
