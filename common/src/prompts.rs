//! プロンプト生成モジュール
//!
//! - SYSTEM_PROMPT: systemロールの固定文
//! - build_sentiment_prompt: コメント1件分のuserプロンプト

use crate::catalog::activity_names;

/// systemロールの説明文
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// 感情スコア算出用プロンプト生成
///
/// # Arguments
/// * `comment` - 前処理済みコメント
///
/// # Returns
/// アクティビティ一覧（カタログ宣言順）とJSON出力指示を含むプロンプト
pub fn build_sentiment_prompt(comment: &str) -> String {
    let activities = activity_names().collect::<Vec<_>>().join(", ");

    format!(
        "Analyze the following comment and provide a sentiment score from 0 to 10 for each activity: {comment}\n\
         Activities: {activities}.\n\
         Provide the score for each activity in a JSON format."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_comment() {
        let prompt = build_sentiment_prompt("test drive amazing");
        assert!(prompt.starts_with(
            "Analyze the following comment and provide a sentiment score from 0 to 10 for each activity: test drive amazing\n"
        ));
        assert!(prompt.ends_with("Provide the score for each activity in a JSON format."));
    }

    #[test]
    fn test_prompt_lists_activities_in_catalog_order() {
        let prompt = build_sentiment_prompt("");
        let expected = "Activities: Search on the brand’s website, First visit to the dealership, \
Model comparison at the dealership, The test drive, Valuation of your used one in exchange, \
Negotiating the value of the new car, Financing at the dealership, Signing the purchase contract, \
Car delivery, First maintenance at the dealership.\n";
        assert!(prompt.contains(expected), "{prompt}");
    }

    #[test]
    fn test_prompt_has_three_lines() {
        let prompt = build_sentiment_prompt("great price");
        assert_eq!(prompt.lines().count(), 3);
    }
}
