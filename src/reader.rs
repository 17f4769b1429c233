//! スプレッドシート読み込み
//!
//! 先頭シートの1行目をヘッダとし、指定列のコメントを先頭から最大 line_limit 行読む

use crate::error::{SentimentError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::info;

/// 読み込み結果
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    /// 検出した列名
    pub headers: Vec<String>,
    /// コメント列の値（行順）
    pub comments: Vec<String>,
}

pub fn read_comments(path: &Path, column: &str, line_limit: usize) -> Result<SheetData> {
    if !path.exists() {
        return Err(SentimentError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SentimentError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            SentimentError::SpreadsheetRead(format!("シートがありません: {}", path.display()))
        })?
        .map_err(|e| SentimentError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    info!("Column names: {:?}", headers);

    let column_index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SentimentError::MissingColumn {
            column: column.to_string(),
            found: headers.clone(),
        })?;

    let comments = rows
        .take(line_limit)
        .map(|row| row.get(column_index).map(cell_to_string).unwrap_or_default())
        .collect();

    Ok(SheetData { headers, comments })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
