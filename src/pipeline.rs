//! ファイル単位の処理パイプライン
//!
//! 読み込み → 行ごとに 前処理 → API呼び出し → パース → テーブル組み立て → CSV保存。
//! 行もファイルも1件ずつ順番に処理する。

use crate::analyzer::{SentimentAnalyzer, SentimentBackend};
use crate::config::Config;
use crate::error::Result;
use crate::export::write_csv;
use crate::reader::read_comments;
use crate::scanner::{output_path_for, scan_inputs};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use sentiment_common::{
    fallback_scores, parse_scores, preprocess_text, CommentRecord, FallbackReason, ScoreTable,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 行・ファイル単位のエラー時の挙動
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    /// 最初のエラーで中断
    #[default]
    Abort,
    /// 行はN/Aで埋め、ファイルは記録して次へ
    Skip,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub line_limit: usize,
    pub comment_column: String,
    pub error_policy: ErrorPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            line_limit: 3,
            comment_column: "Comments".into(),
            error_policy: ErrorPolicy::Abort,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            line_limit: config.line_limit,
            comment_column: config.comment_column.clone(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

/// 1ファイル分の処理結果
#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    /// パース失敗でN/Aになった行数
    pub fallback_rows: usize,
    /// API呼び出し失敗でスキップした行数
    pub failed_rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: Vec<FileReport>,
    pub failed: Vec<(PathBuf, String)>,
}

pub struct Pipeline<B> {
    config: PipelineConfig,
    analyzer: SentimentAnalyzer<B>,
    show_progress: bool,
}

impl<B: SentimentBackend> Pipeline<B> {
    pub fn new(config: PipelineConfig, analyzer: SentimentAnalyzer<B>) -> Self {
        Self {
            config,
            analyzer,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn analyzer(&self) -> &SentimentAnalyzer<B> {
        &self.analyzer
    }

    /// コメント1件を処理
    pub async fn process_comment(&self, comment: &str) -> Result<CommentRecord> {
        self.analyze_row(comment).await.map(|(record, _)| record)
    }

    /// 戻り値の bool はフォールバックを使ったかどうか
    async fn analyze_row(&self, comment: &str) -> Result<(CommentRecord, bool)> {
        let mut record = CommentRecord::new(comment);
        record.cleaned = preprocess_text(comment);
        record.response = self.analyzer.analyze_comment(&record.cleaned).await?;

        let outcome = parse_scores(&record.response);
        match &outcome.fallback {
            Some(FallbackReason::NoJson) => {
                error!("No JSON found in analysis: {}", record.response);
            }
            Some(FallbackReason::InvalidJson { json, message }) => {
                error!("JSONDecodeError for analysis: {} ({})", json, message);
            }
            None => {}
        }
        let used_fallback = outcome.is_fallback();
        record.scores = outcome.scores;

        Ok((record, used_fallback))
    }

    /// スプレッドシート1件を処理してCSVを書き出す
    pub async fn process_file(&self, input: &Path, output: &Path) -> Result<FileReport> {
        info!("Processing file: {}", input.display());

        let sheet = read_comments(input, &self.config.comment_column, self.config.line_limit)?;

        let progress = self.progress_bar(sheet.comments.len());
        let mut records = Vec::with_capacity(sheet.comments.len());
        let mut fallback_rows = 0;
        let mut failed_rows = 0;

        for comment in &sheet.comments {
            match self.analyze_row(comment).await {
                Ok((record, used_fallback)) => {
                    if used_fallback {
                        fallback_rows += 1;
                    }
                    records.push(record);
                }
                Err(e) if self.config.error_policy == ErrorPolicy::Skip => {
                    warn!("行をスキップします: {}", e);
                    failed_rows += 1;
                    records.push(CommentRecord {
                        comment: comment.clone(),
                        cleaned: preprocess_text(comment),
                        scores: fallback_scores(),
                        ..Default::default()
                    });
                }
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        let table = ScoreTable::from_records(&self.config.comment_column, &records);
        write_csv(&table, output)?;
        info!(
            "Processing complete. The results are saved in '{}'.",
            output.display()
        );

        Ok(FileReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            rows: records.len(),
            fallback_rows,
            failed_rows,
        })
    }

    /// フォルダ直下の .xlsx をすべて処理
    pub async fn process_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        std::fs::create_dir_all(output_dir)?;
        let inputs = scan_inputs(input_dir)?;
        info!("{}件のスプレッドシートを検出", inputs.len());

        let mut report = BatchReport::default();
        for input in &inputs {
            let output = output_path_for(input, output_dir);
            match self.process_file(&input.path, &output).await {
                Ok(file_report) => report.processed.push(file_report),
                Err(e) if self.config.error_policy == ErrorPolicy::Skip => {
                    error!("ファイル処理に失敗: {}: {}", input.path.display(), e);
                    report.failed.push((input.path.clone(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        progress
    }
}
