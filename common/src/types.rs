//! 共通型定義

use serde_json::Value;

/// スコア取得失敗時のプレースホルダ
pub const NOT_AVAILABLE: &str = "N/A";

/// アクティビティ名 → スコア（キー順序を保持）
///
/// 値はモデルが返したものをそのまま保持する（整数 0〜10 または "N/A" を想定）
pub type ScoreMap = serde_json::Map<String, Value>;

/// コメント1行分のレコード
///
/// 読み込み時に生成し、前処理・API呼び出し・パースの各段階で埋めていく
#[derive(Debug, Clone, Default)]
pub struct CommentRecord {
    /// 元のコメント
    pub comment: String,
    pub cleaned: String,          // 前処理済みテキスト
    pub response: String,         // モデルの生レスポンス
    pub scores: ScoreMap,         // パース済みスコア
}

impl CommentRecord {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            ..Default::default()
        }
    }
}

/// CSVセル用の文字列表現
///
/// 文字列はそのまま、nullは空、配列・オブジェクトはコンパクトなJSON
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
