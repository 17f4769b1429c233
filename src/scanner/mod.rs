use crate::error::{SentimentError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl InputFile {
    /// 最初の `.` より前の部分（"a.b.xlsx" → "a"）
    pub fn stem(&self) -> &str {
        self.file_name
            .split('.')
            .next()
            .unwrap_or(&self.file_name)
    }
}

const SPREADSHEET_EXTENSION: &str = ".xlsx";

pub fn scan_inputs(folder: &Path) -> Result<Vec<InputFile>> {
    if !folder.is_dir() {
        return Err(SentimentError::FolderNotFound(folder.display().to_string()));
    }

    let mut inputs = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if is_spreadsheet(&file_name) {
            inputs.push(InputFile {
                path: path.to_path_buf(),
                file_name,
            });
        }
    }

    // ファイル名でソート
    inputs.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(inputs)
}

/// 出力CSVのパス: `output_dir/output_<stem>.csv`
pub fn output_path_for(input: &InputFile, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("output_{}.csv", input.stem()))
}

fn is_spreadsheet(file_name: &str) -> bool {
    file_name.ends_with(SPREADSHEET_EXTENSION)
}
