//! CSV出力
//!
//! ヘッダ行 + データ行。行インデックス列は出力しない

use crate::error::Result;
use sentiment_common::ScoreTable;
use std::path::Path;

pub fn write_csv(table: &ScoreTable, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}
