//! 出力テーブル組み立て
//!
//! 元コメント列 + 各行のスコアキーの和集合（初出順）の列を持つ。
//! ある行に無いキーのセルは空文字になる。

use crate::types::{render_value, CommentRecord};

/// CSV出力用テーブル
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ScoreTable {
    /// レコード列からテーブルを構築
    pub fn from_records(comment_column: &str, records: &[CommentRecord]) -> Self {
        let mut score_columns: Vec<&str> = Vec::new();
        for record in records {
            for key in record.scores.keys() {
                if !score_columns.contains(&key.as_str()) {
                    score_columns.push(key);
                }
            }
        }

        let headers = std::iter::once(comment_column)
            .chain(score_columns.iter().copied())
            .map(String::from)
            .collect();

        let rows = records
            .iter()
            .map(|record| {
                let mut row = Vec::with_capacity(score_columns.len() + 1);
                row.push(record.comment.clone());
                row.extend(score_columns.iter().map(|column| {
                    record
                        .scores
                        .get(*column)
                        .map(render_value)
                        .unwrap_or_default()
                }));
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
