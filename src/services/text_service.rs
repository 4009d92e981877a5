//! 文本预处理服务 - 业务能力层
//!
//! 只负责"清洗文本"和"切分句子"两个能力，不关心流程

use regex::Regex;
use std::sync::OnceLock;

/// 不在允许范围内的字符：词字符、空白和 `. , ; : ! ? ( ) -` 之外的一切
fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s.,;:!?()-]").expect("字符过滤正则无效"))
}

/// 连续空白
fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("空白折叠正则无效"))
}

/// 清洗原始笔记文本
///
/// 依次：删除允许范围外的字符 → 把连续空白折叠为单个空格 → 去掉首尾
/// 空白。删除字符可能让两段空白相邻，所以折叠必须在删除之后做，这样
/// 整个操作才是幂等的。永不失败，空输入得到空输出。
pub fn normalize(raw: &str) -> String {
    let stripped = disallowed_chars().replace_all(raw, "");
    let collapsed = whitespace_runs().replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// 句子切分器
///
/// 按句号切分规范化文本，丢弃空片段和词数不足的片段。
/// 产出惰性迭代器，保持文档顺序；可以对同一段文本重复调用。
#[derive(Debug, Clone, Copy)]
pub struct SentenceSegmenter {
    min_words: usize,
}

impl SentenceSegmenter {
    /// 默认的最小词数
    pub const DEFAULT_MIN_WORDS: usize = 4;

    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    /// 切分出所有满足最小词数的句子
    ///
    /// 没有合格句子时得到空迭代器，由调用方决定如何处理。
    pub fn split<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let min_words = self.min_words;
        text.split('.')
            .map(str::trim)
            .filter(move |s| !s.is_empty() && s.split_whitespace().count() >= min_words)
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a   b\t\nc"), "a b c");
    }

    #[test]
    fn test_normalize_strips_disallowed_chars() {
        assert_eq!(
            normalize("Cells* divide <quickly>; mitosis@ follows."),
            "Cells divide quickly; mitosis follows."
        );
    }

    #[test]
    fn test_normalize_keeps_allowed_punctuation() {
        let text = "One, two; three: four! five? (six) - seven.";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t  "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        // 删掉特殊字符会让两侧空白相邻，二次清洗必须不再有变化
        let raw = "alpha @ beta   gamma!! \n delta";
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_segmenter_filters_short_fragments() {
        let segmenter = SentenceSegmenter::default();
        let text = "The mitochondria is the powerhouse of the cell. Too short. \
                    It produces ATP through cellular respiration.";
        let sentences: Vec<&str> = segmenter.split(text).collect();
        assert_eq!(
            sentences,
            vec![
                "The mitochondria is the powerhouse of the cell",
                "It produces ATP through cellular respiration"
            ]
        );
    }

    #[test]
    fn test_segmenter_is_restartable() {
        let segmenter = SentenceSegmenter::default();
        let text = "One two three four. Five six seven eight.";
        let first: Vec<&str> = segmenter.split(text).collect();
        let second: Vec<&str> = segmenter.split(text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_segmenter_no_qualifying_sentences() {
        let segmenter = SentenceSegmenter::default();
        assert_eq!(segmenter.split("Tiny. Bits. Here.").count(), 0);
    }

    #[test]
    fn test_segmenter_custom_min_words() {
        let segmenter = SentenceSegmenter::new(2);
        assert_eq!(segmenter.split("Tiny bits. Here.").count(), 1);
    }
}
