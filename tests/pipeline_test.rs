//! パイプライン統合テスト
//!
//! xlsx → 前処理 → (モック)API → パース → CSV の一連の流れを検証。
//! ネットワークには接続しない。

use async_trait::async_trait;
use comment_sentiment::analyzer::{AnalysisOptions, ChatRequest, SentimentAnalyzer, SentimentBackend};
use comment_sentiment::error::{Result, SentimentError};
use comment_sentiment::pipeline::{ErrorPolicy, Pipeline, PipelineConfig};
use rust_xlsxwriter::Workbook;
use sentiment_common::activity_names;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;

/// 全アクティビティに同じスコアを返すJSON
fn full_reply(score: u8) -> String {
    let body = activity_names()
        .map(|name| format!("\"{}\": {}", name, score))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Here are the scores:\n{{{}}}", body)
}

/// 順番にレスポンスを返すモック（None はAPIエラー）
struct ScriptedBackend {
    replies: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(replies: Vec<Option<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn always(reply: String, count: usize) -> Self {
        Self::new(vec![Some(reply); count])
    }
}

#[async_trait]
impl SentimentBackend for ScriptedBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push(request.messages[1].content.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            Some(None) => Err(SentimentError::ApiCall("status 500: upstream error".into())),
            None => Err(SentimentError::ApiCall("no scripted reply left".into())),
        }
    }
}

fn write_comments(path: &Path, header: &str, comments: &[&str]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Id").unwrap();
    sheet.write_string(0, 1, header).unwrap();
    for (i, comment) in comments.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, row as f64).unwrap();
        sheet.write_string(row, 1, *comment).unwrap();
    }
    workbook.save(path).unwrap();
}

fn pipeline(backend: ScriptedBackend, line_limit: usize, policy: ErrorPolicy) -> Pipeline<ScriptedBackend> {
    let config = PipelineConfig {
        line_limit,
        comment_column: "Comments".to_string(),
        error_policy: policy,
    };
    Pipeline::new(config, SentimentAnalyzer::new(backend, AnalysisOptions::default()))
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("CSVを開けない");
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

const COMMENTS: &[&str] = &[
    "The test drive was AMAZING!!",
    "Delivery took three weeks, very disappointing.",
    "Financing at the dealership was smooth.",
    "Salesman was rude during negotiation.",
    "First maintenance was quick and cheap.",
];

#[tokio::test]
async fn test_three_rows_end_to_end() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    let output = dir.path().join("outputs").join("output_survey.csv");
    write_comments(&input, "Comments", &COMMENTS[..3]);

    let p = pipeline(ScriptedBackend::always(full_reply(7), 3), 3, ErrorPolicy::Abort);
    let report = p.process_file(&input, &output).await.unwrap();

    assert_eq!(report.rows, 3);
    assert_eq!(report.fallback_rows, 0);

    let (headers, rows) = read_csv(&output);
    assert_eq!(headers.len(), 11);
    assert_eq!(headers[0], "Comments");
    let expected: Vec<&str> = activity_names().collect();
    assert_eq!(&headers[1..], expected.as_slice());

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "The test drive was AMAZING!!");
    assert!(rows.iter().all(|r| r[1..].iter().all(|cell| cell == "7")));

    // プロンプトには前処理済みコメントが入る
    let prompts = p.analyzer().backend().prompts.lock().unwrap();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("activity: test drive amazing\n"));
}

#[tokio::test]
async fn test_line_limit_controls_row_count() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    write_comments(&input, "Comments", COMMENTS);

    for (limit, expected) in [(1, 1), (3, 3), (5, 5), (10, 5)] {
        let output = dir.path().join(format!("out_{}.csv", limit));
        let p = pipeline(ScriptedBackend::always(full_reply(5), 10), limit, ErrorPolicy::Abort);
        let report = p.process_file(&input, &output).await.unwrap();

        assert_eq!(report.rows, expected);
        let (headers, rows) = read_csv(&output);
        assert_eq!(rows.len(), expected, "line_limit={}", limit);
        assert_eq!(headers.len(), 11);
    }
}

#[tokio::test]
async fn test_malformed_reply_gets_na_row() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    let output = dir.path().join("out.csv");
    write_comments(&input, "Comments", &COMMENTS[..2]);

    let backend = ScriptedBackend::new(vec![
        Some(full_reply(9)),
        Some(r#"{"The test drive": 9,"#.to_string()),
    ]);
    let p = pipeline(backend, 3, ErrorPolicy::Abort);
    let report = p.process_file(&input, &output).await.unwrap();

    assert_eq!(report.rows, 2);
    assert_eq!(report.fallback_rows, 1);

    let (headers, rows) = read_csv(&output);
    assert_eq!(headers.len(), 11);
    assert!(rows[0][1..].iter().all(|cell| cell == "9"));
    assert!(rows[1][1..].iter().all(|cell| cell == "N/A"));
}

#[tokio::test]
async fn test_inconsistent_keys_leave_empty_cells() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    let output = dir.path().join("out.csv");
    write_comments(&input, "Comments", &COMMENTS[..2]);

    let backend = ScriptedBackend::new(vec![
        Some(r#"Sure, here you go: {"The test drive": 9, "Car delivery": 3}"#.to_string()),
        Some(r#"{"Car delivery": 1, "Parking": 4}"#.to_string()),
    ]);
    let p = pipeline(backend, 3, ErrorPolicy::Abort);
    p.process_file(&input, &output).await.unwrap();

    let (headers, rows) = read_csv(&output);
    assert_eq!(headers, vec!["Comments", "The test drive", "Car delivery", "Parking"]);
    assert_eq!(rows[0][1..], ["9", "3", ""]);
    assert_eq!(rows[1][1..], ["", "1", "4"]);
}

#[tokio::test]
async fn test_abort_policy_stops_on_api_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    let output = dir.path().join("out.csv");
    write_comments(&input, "Comments", &COMMENTS[..3]);

    let backend = ScriptedBackend::new(vec![Some(full_reply(8)), None, Some(full_reply(8))]);
    let p = pipeline(backend, 3, ErrorPolicy::Abort);
    let result = p.process_file(&input, &output).await;

    assert!(matches!(result, Err(SentimentError::ApiCall(_))));
    assert!(!output.exists(), "中断時はCSVを書かない");
}

#[tokio::test]
async fn test_skip_policy_fills_failed_row() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.xlsx");
    let output = dir.path().join("out.csv");
    write_comments(&input, "Comments", &COMMENTS[..3]);

    let backend = ScriptedBackend::new(vec![Some(full_reply(8)), None, Some(full_reply(6))]);
    let p = pipeline(backend, 3, ErrorPolicy::Skip);
    let report = p.process_file(&input, &output).await.unwrap();

    assert_eq!(report.rows, 3);
    assert_eq!(report.failed_rows, 1);

    let (_, rows) = read_csv(&output);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], COMMENTS[1]);
    assert!(rows[1][1..].iter().all(|cell| cell == "N/A"));
    assert!(rows[2][1..].iter().all(|cell| cell == "6"));
}

#[tokio::test]
async fn test_process_dir_writes_one_csv_per_input() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("inputs");
    let outputs = dir.path().join("outputs");
    std::fs::create_dir_all(&inputs).unwrap();
    write_comments(&inputs.join("north.xlsx"), "Comments", &COMMENTS[..2]);
    write_comments(&inputs.join("south.v2.xlsx"), "Comments", &COMMENTS[2..]);
    std::fs::write(inputs.join("readme.txt"), "ignored").unwrap();

    let p = pipeline(ScriptedBackend::always(full_reply(4), 10), 3, ErrorPolicy::Abort);
    let report = p.process_dir(&inputs, &outputs).await.unwrap();

    assert_eq!(report.processed.len(), 2);
    assert!(report.failed.is_empty());

    let (_, north) = read_csv(&outputs.join("output_north.csv"));
    let (_, south) = read_csv(&outputs.join("output_south.csv"));
    assert_eq!(north.len(), 2);
    assert_eq!(south.len(), 3);
}

#[tokio::test]
async fn test_process_dir_missing_column() {
    let dir = tempdir().unwrap();
    let inputs = dir.path().join("inputs");
    let outputs = dir.path().join("outputs");
    std::fs::create_dir_all(&inputs).unwrap();
    write_comments(&inputs.join("a_bad.xlsx"), "Feedback", &COMMENTS[..1]);
    write_comments(&inputs.join("b_good.xlsx"), "Comments", &COMMENTS[..1]);

    // abort: 最初のファイルで停止
    let p = pipeline(ScriptedBackend::always(full_reply(4), 10), 3, ErrorPolicy::Abort);
    let result = p.process_dir(&inputs, &outputs).await;
    assert!(matches!(result, Err(SentimentError::MissingColumn { .. })));
    assert!(!outputs.join("output_b_good.csv").exists());

    // skip: 失敗を記録して次のファイルへ
    let p = pipeline(ScriptedBackend::always(full_reply(4), 10), 3, ErrorPolicy::Skip);
    let report = p.process_dir(&inputs, &outputs).await.unwrap();
    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("a_bad.xlsx"));
    assert!(outputs.join("output_b_good.csv").exists());
}

#[tokio::test]
async fn test_process_dir_missing_input_folder() {
    let dir = tempdir().unwrap();
    let p = pipeline(ScriptedBackend::always(full_reply(4), 1), 3, ErrorPolicy::Abort);
    let result = p
        .process_dir(&dir.path().join("nope"), &dir.path().join("outputs"))
        .await;
    assert!(matches!(result, Err(SentimentError::FolderNotFound(_))));
}
