//! 教师名单表格读取
//!
//! 支持 Excel / ODS 工作簿（读取第一个工作表）和 CSV，第一行为表头。

use crate::error::{AppError, AppResult};
use crate::models::{FacultyRecord, Roster};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info};

/// 教师姓名列
pub const NAME_COLUMN: &str = "Faculty Name";
/// Scholar 主页链接列
pub const PROFILE_URL_COLUMN: &str = "Google Scholar Profile URL";

/// 表头 + 数据行，单元格均已转成字符串
#[derive(Debug, Default)]
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// 读取表格并校验必需的两列
///
/// 缺列时返回 [`AppError::MissingColumns`]，由调用方决定如何结束运行。
pub fn read_roster(path: &Path) -> AppResult<Roster> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        other => {
            return Err(AppError::spreadsheet_failed(
                path,
                format!("不支持的文件类型: '{}'", other),
            ))
        }
    };

    info!("✅ 表格读取成功，共 {} 行", table.rows.len());
    table.into_roster()
}

impl Table {
    fn into_roster(self) -> AppResult<Roster> {
        let position = |column: &str| self.headers.iter().position(|h| h == column);

        let (Some(name_idx), Some(url_idx)) = (position(NAME_COLUMN), position(PROFILE_URL_COLUMN))
        else {
            return Err(AppError::MissingColumns {
                found: self.headers.clone(),
                expected: vec![NAME_COLUMN.to_string(), PROFILE_URL_COLUMN.to_string()],
            });
        };

        let cell = |row: &Vec<String>, idx: usize| row.get(idx).cloned().unwrap_or_default();

        let records = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .map(|row| FacultyRecord::new(cell(row, name_idx), cell(row, url_idx)))
            .collect();

        Ok(Roster { records })
    }
}

fn read_csv(path: &Path) -> AppResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::spreadsheet_failed(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::spreadsheet_failed(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::spreadsheet_failed(path, e))?;
        rows.push(record.iter().map(|c| c.trim().to_string()).collect());
    }

    debug!("CSV 读取 {} 行数据", rows.len());
    Ok(Table { headers, rows })
}

fn read_workbook(path: &Path) -> AppResult<Table> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| AppError::spreadsheet_failed(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::spreadsheet_failed(path, "工作簿中没有工作表"))?
        .map_err(|e| AppError::spreadsheet_failed(path, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    debug!("工作表读取 {} 行数据", rows.len());
    Ok(Table { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("{}", *f as i64)
        }
        other => other.to_string().trim().to_string(),
    }
}
