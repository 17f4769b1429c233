use anyhow::Context;
use clap::Parser;
use comment_sentiment::{analyzer, cli, config, logging, pipeline, scanner};
use analyzer::{AnalysisOptions, OpenAiClient, SentimentAnalyzer};
use cli::{Cli, Commands, TuningArgs};
use config::Config;
use pipeline::{Pipeline, PipelineConfig};
use sentiment_common::{build_sentiment_prompt, preprocess_text};
use std::path::PathBuf;

fn build_pipeline(config: &Config, tuning: &TuningArgs) -> anyhow::Result<Pipeline<OpenAiClient>> {
    let client = OpenAiClient::from_config(config)?;
    let analyzer = SentimentAnalyzer::new(client, AnalysisOptions::from(config));
    let pipeline_config = PipelineConfig {
        error_policy: tuning.on_error,
        ..PipelineConfig::from(config)
    };
    Ok(Pipeline::new(pipeline_config, analyzer).with_progress(true))
}

fn effective_config(base: &Config, tuning: &TuningArgs) -> anyhow::Result<Config> {
    let mut config = base.clone();
    tuning.apply(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Run { input, output, tuning } => {
            println!("📝 comment-sentiment - 一括処理\n");

            let config = effective_config(&config, &tuning)?;
            let pipeline = build_pipeline(&config, &tuning)?;
            let report = pipeline.process_dir(&input, &output).await?;

            for file in &report.processed {
                println!(
                    "✔ {} → {} ({}行, N/A {}行, スキップ {}行)",
                    file.input.display(),
                    file.output.display(),
                    file.rows,
                    file.fallback_rows,
                    file.failed_rows
                );
            }
            for (path, reason) in &report.failed {
                println!("✘ {}: {}", path.display(), reason);
            }

            println!(
                "\n✅ 完了 (成功 {}件, 失敗 {}件)",
                report.processed.len(),
                report.failed.len()
            );
        }

        Commands::File { input, output, tuning } => {
            let config = effective_config(&config, &tuning)?;
            let output = match output {
                Some(path) => path,
                None => {
                    let file_name = input
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    let input_file = scanner::InputFile {
                        path: input.clone(),
                        file_name,
                    };
                    scanner::output_path_for(&input_file, &PathBuf::from("outputs"))
                }
            };

            let pipeline = build_pipeline(&config, &tuning)?;
            let report = pipeline.process_file(&input, &output).await?;
            println!("✔ 結果を保存: {} ({}行)", report.output.display(), report.rows);
        }

        Commands::Clean { text } => {
            println!("{}", preprocess_text(&text));
        }

        Commands::Prompt { text } => {
            println!("{}", build_sentiment_prompt(&preprocess_text(&text)));
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  API: {}", config.api_base);
                println!("  temperature: {}", config.temperature);
                println!("  max_tokens: {}", config.max_tokens);
                println!("  読み込み行数: {}", config.line_limit);
                println!("  コメント列: {}", config.comment_column);
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
