//! コメント前処理
//!
//! 小文字化 → 非単語文字を空白に置換 → 空白の圧縮 → トークン分割 → ストップワード除去

use regex::Regex;
use std::collections::HashSet;

/// 英語ストップワード（NLTK englishリスト）
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

lazy_static::lazy_static! {
    // 文字・数字・`_` 以外（結合文字 Mn/Mc も非単語扱い）
    static ref NON_WORD_RE: Regex = Regex::new(r"[^\p{L}\p{N}_]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    // Treebank方式の複合語分割（cannot → can not など）
    static ref JOINED_WORD_RES: Vec<Regex> = [
        r"(?i)\b(can)(not)\b",
        r"(?i)\b(gim)(me)\b",
        r"(?i)\b(gon)(na)\b",
        r"(?i)\b(got)(ta)\b",
        r"(?i)\b(lem)(me)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
    // 後続の空白が必要（lookahead非対応のため空白ごと置換）
    static ref WANNA_RE: Regex = Regex::new(r"(?i)\b(wan)(na)\s").unwrap();
    static ref STOPWORDS: HashSet<&'static str> = ENGLISH_STOPWORDS.iter().copied().collect();
}

/// ストップワード判定（小文字トークン前提）
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// コメントを正規化し、空白区切りのトークン列を返す
///
/// # Examples
/// ```
/// use sentiment_common::preprocess_text;
///
/// assert_eq!(preprocess_text("The test drive was AMAZING!!"), "test drive amazing");
/// ```
pub fn preprocess_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = NON_WORD_RE.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RE.replace_all(&replaced, " ");
    let tokenized = split_joined_words(&collapsed);

    tokenized
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 前後に空白を足してから複合語を2語に分ける
fn split_joined_words(text: &str) -> String {
    let mut padded = format!(" {} ", text);
    for re in JOINED_WORD_RES.iter() {
        padded = re.replace_all(&padded, "${1} ${2}").into_owned();
    }
    WANNA_RE.replace_all(&padded, "${1} ${2} ").into_owned()
}
