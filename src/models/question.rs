use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// 题目类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizKind {
    /// 四选一选择题
    #[serde(rename = "mcq")]
    MultipleChoice,
    /// 问答闪卡
    #[serde(rename = "flashcard")]
    Flashcard,
}

impl QuizKind {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuizKind::MultipleChoice => "mcq",
            QuizKind::Flashcard => "flashcard",
        }
    }

    /// 尝试从字符串解析题目类型
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mcq" | "multiple_choice" | "choice" => Some(QuizKind::MultipleChoice),
            "flashcard" | "card" => Some(QuizKind::Flashcard),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuizKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一道题目记录
///
/// 解析器和兜底生成器产出的唯一实体。构造后不可变：
/// - 选择题携带 4 个互不相同的选项和一个指向正确选项的索引
/// - 闪卡携带一个非空答案
/// - 题干永远非空
///
/// 两个构造函数负责校验上述约束，违规时返回 [`RecordError`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "type")]
    kind: QuizKind,

    #[serde(rename = "question")]
    prompt_text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,

    #[serde(rename = "correct_answer", skip_serializing_if = "Option::is_none")]
    correct_index: Option<usize>,

    #[serde(rename = "answer", skip_serializing_if = "Option::is_none")]
    answer_text: Option<String>,
}

impl QuestionRecord {
    /// 创建一道选择题
    ///
    /// # 参数
    /// - `prompt_text`: 题干
    /// - `options`: 恰好 4 个互不相同的选项
    /// - `correct_index`: 正确选项索引，范围 [0, 3]
    pub fn multiple_choice(
        prompt_text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, RecordError> {
        let prompt_text = prompt_text.into();
        if prompt_text.trim().is_empty() {
            return Err(RecordError::EmptyPrompt);
        }
        if options.len() != 4 {
            return Err(RecordError::WrongOptionCount {
                found: options.len(),
            });
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(RecordError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }
        if correct_index > 3 {
            return Err(RecordError::CorrectIndexOutOfRange {
                index: correct_index,
            });
        }

        Ok(Self {
            kind: QuizKind::MultipleChoice,
            prompt_text,
            options: Some(options),
            correct_index: Some(correct_index),
            answer_text: None,
        })
    }

    /// 创建一张闪卡
    pub fn flashcard(
        prompt_text: impl Into<String>,
        answer_text: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let prompt_text = prompt_text.into();
        let answer_text = answer_text.into();
        if prompt_text.trim().is_empty() {
            return Err(RecordError::EmptyPrompt);
        }
        if answer_text.trim().is_empty() {
            return Err(RecordError::EmptyAnswer);
        }

        Ok(Self {
            kind: QuizKind::Flashcard,
            prompt_text,
            options: None,
            correct_index: None,
            answer_text: Some(answer_text),
        })
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    /// 选项列表，仅选择题为 Some
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    /// 正确选项索引，仅选择题为 Some
    pub fn correct_index(&self) -> Option<usize> {
        self.correct_index
    }

    /// 正确选项的文本，仅选择题为 Some
    pub fn correct_option(&self) -> Option<&str> {
        let options = self.options.as_ref()?;
        options.get(self.correct_index?).map(String::as_str)
    }

    /// 闪卡答案，仅闪卡为 Some
    pub fn answer_text(&self) -> Option<&str> {
        self.answer_text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_options() -> Vec<String> {
        vec![
            "alpha".to_string(),
            "beta".to_string(),
            "gamma".to_string(),
            "delta".to_string(),
        ]
    }

    #[test]
    fn test_multiple_choice_valid() {
        let record = QuestionRecord::multiple_choice("What is alpha?", four_options(), 2).unwrap();
        assert_eq!(record.kind(), QuizKind::MultipleChoice);
        assert_eq!(record.options().unwrap().len(), 4);
        assert_eq!(record.correct_index(), Some(2));
        assert_eq!(record.correct_option(), Some("gamma"));
        assert!(record.answer_text().is_none());
    }

    #[test]
    fn test_multiple_choice_rejects_empty_prompt() {
        let result = QuestionRecord::multiple_choice("   ", four_options(), 0);
        assert!(matches!(result, Err(RecordError::EmptyPrompt)));
    }

    #[test]
    fn test_multiple_choice_rejects_wrong_count() {
        let result = QuestionRecord::multiple_choice(
            "q",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            0,
        );
        assert!(matches!(
            result,
            Err(RecordError::WrongOptionCount { found: 3 })
        ));
    }

    #[test]
    fn test_multiple_choice_rejects_duplicates() {
        let mut options = four_options();
        options[3] = "alpha".to_string();
        let result = QuestionRecord::multiple_choice("q", options, 0);
        assert!(matches!(result, Err(RecordError::DuplicateOption { .. })));
    }

    #[test]
    fn test_multiple_choice_rejects_bad_index() {
        let result = QuestionRecord::multiple_choice("q", four_options(), 4);
        assert!(matches!(
            result,
            Err(RecordError::CorrectIndexOutOfRange { index: 4 })
        ));
    }

    #[test]
    fn test_flashcard_valid() {
        let record = QuestionRecord::flashcard("What is described?", "The full sentence.").unwrap();
        assert_eq!(record.kind(), QuizKind::Flashcard);
        assert_eq!(record.answer_text(), Some("The full sentence."));
        assert!(record.options().is_none());
        assert!(record.correct_index().is_none());
    }

    #[test]
    fn test_flashcard_rejects_empty_answer() {
        let result = QuestionRecord::flashcard("q", "  ");
        assert!(matches!(result, Err(RecordError::EmptyAnswer)));
    }

    #[test]
    fn test_json_round_trip_preserves_options_and_index() {
        let record = QuestionRecord::multiple_choice("What is alpha?", four_options(), 3).unwrap();
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: QuestionRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.options(), record.options());
        assert_eq!(decoded.correct_index(), Some(3));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(QuizKind::from_str("mcq"), Some(QuizKind::MultipleChoice));
        assert_eq!(QuizKind::from_str(" Flashcard "), Some(QuizKind::Flashcard));
        assert_eq!(QuizKind::from_str("essay"), None);
    }
}
