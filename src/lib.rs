//! comment-sentiment
//!
//! スプレッドシートの顧客コメントをLLMでアクティビティ別にスコアリングし、CSVに出力する

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod reader;
pub mod scanner;

pub use sentiment_common as common;
