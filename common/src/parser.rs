//! APIレスポンスパーサー
//!
//! モデルの自由文レスポンスからJSONオブジェクトを抽出し、
//! アクティビティ → スコアのマップに変換する

use crate::catalog::activity_names;
use crate::error::{Error, Result};
use crate::types::{ScoreMap, NOT_AVAILABLE};
use serde_json::Value;

/// フォールバックになった理由
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// `{`...`}` が見つからない
    NoJson,
    /// 抽出した文字列がJSONとして不正
    InvalidJson { json: String, message: String },
}

/// パース結果
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub scores: ScoreMap,
    /// フォールバックを使った場合のみSome
    pub fallback: Option<FallbackReason>,
}

impl ParseOutcome {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// APIレスポンスからJSON部分を抽出
///
/// 最初の `{` から最後の `}` までを貪欲に切り出す（括弧の対応は見ない）。
/// 文章中に複数のオブジェクトや括弧がある場合もそのまま一括で切り出す。
///
/// # Examples
/// ```
/// use sentiment_common::extract_json;
///
/// let response = "Sure: {\"Car delivery\": 3} hope this helps";
/// assert_eq!(extract_json(response).unwrap(), "{\"Car delivery\": 3}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 全アクティビティを "N/A" にしたフォールバック（カタログ順）
pub fn fallback_scores() -> ScoreMap {
    activity_names()
        .map(|name| (name.to_string(), Value::String(NOT_AVAILABLE.to_string())))
        .collect()
}

/// レスポンスをスコアマップに変換
///
/// 抽出・デシリアライズのどちらかに失敗したら10キーのフォールバックを返す。
/// 部分的な復元は行わない。キーはカタログと照合しない。
pub fn parse_scores(response: &str) -> ParseOutcome {
    let json_str = match extract_json(response) {
        Ok(s) => s,
        Err(_) => {
            return ParseOutcome {
                scores: fallback_scores(),
                fallback: Some(FallbackReason::NoJson),
            }
        }
    };

    match serde_json::from_str::<ScoreMap>(json_str) {
        Ok(scores) => ParseOutcome {
            scores,
            fallback: None,
        },
        Err(e) => ParseOutcome {
            scores: fallback_scores(),
            fallback: Some(FallbackReason::InvalidJson {
                json: json_str.to_string(),
                message: e.to_string(),
            }),
        },
    }
}
