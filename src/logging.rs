//! ログ初期化
//!
//! RUST_LOG があればそれを優先し、なければ info（--verbose で debug）

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("comment_sentiment={default_level}"))
        }))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
