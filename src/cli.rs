use clap::{Args, Parser, Subcommand};
use crate::config::Config;
use crate::pipeline::ErrorPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "comment-sentiment")]
#[command(about = "顧客コメントのアクティビティ別感情スコアリングツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 実行ごとの上書き設定（未指定なら設定ファイルの値）
#[derive(Args, Debug, Clone, Default)]
pub struct TuningArgs {
    /// 1ファイルあたりの読み込み行数
    #[arg(short = 'n', long)]
    pub line_limit: Option<usize>,

    /// temperature (0.0-2.0)
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// レスポンスの最大トークン数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// モデル名
    #[arg(short, long)]
    pub model: Option<String>,

    /// コメント列の名前
    #[arg(long)]
    pub column: Option<String>,

    /// エラー時の挙動 (abort/skip)
    #[arg(long, value_enum, default_value = "abort")]
    pub on_error: ErrorPolicy,
}

impl TuningArgs {
    /// 設定ファイルの値に上書きを適用
    pub fn apply(&self, config: &mut Config) {
        if let Some(n) = self.line_limit {
            config.line_limit = n;
        }
        if let Some(t) = self.temperature {
            config.temperature = t;
        }
        if let Some(m) = self.max_tokens {
            config.max_tokens = m;
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(column) = &self.column {
            config.comment_column = column.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入力フォルダ内の .xlsx をすべて解析してCSVを出力
    Run {
        /// 入力フォルダ
        #[arg(short, long, default_value = "inputs")]
        input: PathBuf,

        /// 出力フォルダ
        #[arg(short, long, default_value = "outputs")]
        output: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// スプレッドシート1件を解析
    File {
        /// 入力 .xlsx ファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力CSV（デフォルト: outputs/output_<stem>.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// 前処理結果を表示（API呼び出しなし）
    Clean {
        /// コメント
        #[arg(required = true)]
        text: String,
    },

    /// 送信されるプロンプトを表示（API呼び出しなし）
    Prompt {
        /// コメント
        #[arg(required = true)]
        text: String,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
