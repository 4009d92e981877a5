//! 生成文本解析服务 - 业务能力层
//!
//! 只负责"把生成服务返回的半结构化文本解析成题目记录"，不关心流程。
//!
//! 解析是防御性的：逐片段尝试，失败的片段记一条 debug 日志后丢弃，
//! 永远不会因为个别片段损坏而放弃整段文本。零条结果是合法输出，
//! 表示"没解析出任何可用题目"，由上层决定是否兜底。

use regex::Regex;
use tracing::debug;

use crate::error::SegmentError;
use crate::models::question::QuestionRecord;

/// 选择题片段的分隔标记
const MCQ_MARKER: &str = "QUESTION:";
/// 正确答案行标记
const CORRECT_MARKER: &str = "CORRECT:";

/// 生成文本解析器
pub struct ResponseParser {
    /// 形如 `A) 选项文本` 的选项行
    option_line: Regex,
    /// 选项行的标记前缀
    option_prefix: Regex,
    /// 词边界上的 `Q:` 标记，避免命中其他单词内部
    card_marker: Regex,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            option_line: Regex::new(r"^[A-D]\)").expect("选项行正则无效"),
            option_prefix: Regex::new(r"^[A-D]\)\s*").expect("选项前缀正则无效"),
            card_marker: Regex::new(r"\bQ:").expect("闪卡标记正则无效"),
        }
    }

    /// 解析选择题格式的生成文本
    ///
    /// 按 `QUESTION:` 切分，第一个标记之前的引言丢弃，之后逐片段解析。
    pub fn parse_mcq(&self, text: &str) -> Vec<QuestionRecord> {
        let mut records = Vec::new();
        for segment in text.split(MCQ_MARKER).skip(1) {
            match self.parse_mcq_segment(segment) {
                Ok(record) => records.push(record),
                Err(e) => debug!("跳过无效的选择题片段: {}", e),
            }
        }
        records
    }

    /// 解析闪卡格式的生成文本
    ///
    /// 按词边界上的 `Q:` 切分，引言丢弃，之后逐片段解析。
    pub fn parse_flashcards(&self, text: &str) -> Vec<QuestionRecord> {
        let mut records = Vec::new();
        for segment in self.card_marker.split(text).skip(1) {
            match self.parse_card_segment(segment) {
                Ok(record) => records.push(record),
                Err(e) => debug!("跳过无效的闪卡片段: {}", e),
            }
        }
        records
    }

    // ========== 片段解析 ==========

    /// 解析单个选择题片段
    ///
    /// 片段至少要有 6 个非空行（题干 + 4 个选项 + 答案行）。选项只从
    /// 题干后面的 4 行里提取，必须恰好凑齐 4 个。
    fn parse_mcq_segment(&self, segment: &str) -> Result<QuestionRecord, SegmentError> {
        let lines = non_empty_lines(segment);
        if lines.len() < 6 {
            return Err(SegmentError::TooFewLines {
                found: lines.len(),
                expected: 6,
            });
        }

        let prompt_text = lines[0];

        let mut options = Vec::new();
        for line in &lines[1..5] {
            if self.option_line.is_match(line) {
                options.push(self.option_prefix.replace(line, "").trim().to_string());
            }
        }
        if options.len() != 4 {
            return Err(SegmentError::BadOptionCount {
                found: options.len(),
            });
        }

        let correct_index = self.find_correct_index(&lines);

        Ok(QuestionRecord::multiple_choice(
            prompt_text,
            options,
            correct_index,
        )?)
    }

    /// 在片段的所有行中找答案行并映射为索引
    ///
    /// `CORRECT:` 匹配不区分大小写；后面的字母不是 A–D 时退回 0，
    /// 整行缺失时也退回 0。
    fn find_correct_index(&self, lines: &[&str]) -> usize {
        for line in lines {
            let upper = line.to_uppercase();
            if let Some(pos) = upper.find(CORRECT_MARKER) {
                let letter = upper[pos + CORRECT_MARKER.len()..].trim();
                return match letter {
                    "A" => 0,
                    "B" => 1,
                    "C" => 2,
                    "D" => 3,
                    _ => 0,
                };
            }
        }
        0
    }

    /// 解析单张闪卡片段
    ///
    /// 第一行是问题，答案取第一个以 `A:` 开头的行。
    fn parse_card_segment(&self, segment: &str) -> Result<QuestionRecord, SegmentError> {
        let lines = non_empty_lines(segment);
        if lines.len() < 2 {
            return Err(SegmentError::TooFewLines {
                found: lines.len(),
                expected: 2,
            });
        }

        let prompt_text = lines[0];

        let answer_text = lines
            .iter()
            .find_map(|line| line.strip_prefix("A:"))
            .map(str::trim)
            .ok_or(SegmentError::MissingAnswer)?;

        Ok(QuestionRecord::flashcard(prompt_text, answer_text)?)
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 片段的非空行，已去掉首尾空白
fn non_empty_lines(segment: &str) -> Vec<&str> {
    segment
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
