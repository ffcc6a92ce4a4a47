//! 输入表格定位

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 在 `root` 下查找名为 `filename` 的文件
///
/// 先检查 `root` 本身，`search_subfolders` 为真时再按目录名顺序深度优先搜索子目录，
/// 返回第一个匹配。
pub async fn find_input_file(
    root: &Path,
    filename: &str,
    search_subfolders: bool,
) -> AppResult<PathBuf> {
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        debug!("扫描目录: {}", dir.display());

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // 根目录不可读是致命的，子目录不可读则跳过
            Err(e) if dir.as_path() == root => return Err(e.into()),
            Err(e) => {
                debug!("跳过无法读取的目录 {}: {}", dir.display(), e);
                continue;
            }
        };

        let mut subdirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name() == filename && is_file(&entry.path()).await {
                return Ok(entry.path());
            }
            // 不跟随目录符号链接，避免循环
            if entry.file_type().await?.is_dir() {
                subdirs.push(entry.path());
            }
        }

        if !search_subfolders {
            break;
        }

        // 栈顶先出，倒序压栈以保持名称顺序
        subdirs.sort();
        pending.extend(subdirs.into_iter().rev());
    }

    Err(AppError::InputNotFound {
        filename: filename.to_string(),
        root: root.to_path_buf(),
    })
}

/// 跟随符号链接判断是否为普通文件，失效链接视为不匹配
async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}
