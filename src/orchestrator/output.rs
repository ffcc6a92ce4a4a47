//! 输出文件写入

use crate::error::{AppError, AppResult};
use crate::models::OutputRecord;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 将全部记录一次性写成 JSON 数组（2 空格缩进，非 ASCII 字符不转义）
///
/// 先写到同目录下的临时文件再改名，目标文件要么是旧内容，要么是完整的新内容。
pub async fn write_output(path: &Path, records: &[OutputRecord]) -> AppResult<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::output_failed(dir, e))?;
    }

    let json = serde_json::to_vec_pretty(records).map_err(|e| AppError::output_failed(path, e))?;

    let tmp = temp_path(path);
    fs::write(&tmp, &json)
        .await
        .map_err(|e| AppError::output_failed(&tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| AppError::output_failed(path, e))?;

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
