//! Comment Sentiment Common Library
//!
//! CLIとテストで共有される型とユーティリティ（ネットワーク・ファイルI/Oなし）

pub mod catalog;
pub mod error;
pub mod parser;
pub mod preprocess;
pub mod prompts;
pub mod table;
pub mod types;

pub use catalog::{activity_names, Activity, ACTIVITIES};
pub use error::{Error, Result};
pub use parser::{extract_json, fallback_scores, parse_scores, FallbackReason, ParseOutcome};
pub use preprocess::{is_stopword, preprocess_text};
pub use prompts::{build_sentiment_prompt, SYSTEM_PROMPT};
pub use table::ScoreTable;
pub use types::{CommentRecord, ScoreMap, NOT_AVAILABLE};
