//! 生成提示词模块
//!
//! 负责构建发给生成服务的两种固定模板提示词，以及每种题型的
//! 采样参数预设。模板末尾带一个引导标记，提示模型直接续写
//! 第一个题目。

use crate::clients::GenerationParams;
use crate::models::question::QuizKind;

/// 按题型构建提示词
pub fn build_prompt(kind: QuizKind, notes: &str, count: usize) -> String {
    match kind {
        QuizKind::MultipleChoice => build_mcq_prompt(notes, count),
        QuizKind::Flashcard => build_flashcard_prompt(notes, count),
    }
}

/// 选择题提示词
///
/// 要求模型严格按 `QUESTION:` / `A)`–`D)` / `CORRECT:` 的行格式输出，
/// 题目之间用 `---` 分隔，与解析器的片段切分约定一致。
pub fn build_mcq_prompt(notes: &str, count: usize) -> String {
    format!(
        r#"Based on the following study notes, create {} multiple choice questions.

Study Notes:
{}

Please format each question exactly like this:
QUESTION: [Clear question text]
A) [First option]
B) [Second option]
C) [Third option]
D) [Fourth option]
CORRECT: [A or B or C or D]
---

QUESTION:"#,
        count, notes
    )
}

/// 闪卡提示词
pub fn build_flashcard_prompt(notes: &str, count: usize) -> String {
    format!(
        r#"Create {} study flashcards from this content:

Content:
{}

Format each flashcard exactly like this:
Q: [Question]
A: [Answer]
---

Q:"#,
        count, notes
    )
}

/// 按题型选择采样参数
pub fn params_for(kind: QuizKind) -> GenerationParams {
    match kind {
        QuizKind::MultipleChoice => GenerationParams {
            max_new_tokens: 600,
            temperature: 0.7,
            do_sample: true,
            top_p: 0.9,
            return_full_text: false,
        },
        QuizKind::Flashcard => GenerationParams {
            max_new_tokens: 400,
            temperature: 0.6,
            do_sample: true,
            top_p: 0.9,
            return_full_text: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcq_prompt_carries_notes_and_count() {
        let prompt = build_mcq_prompt("Cells divide by mitosis.", 3);
        assert!(prompt.contains("create 3 multiple choice questions"));
        assert!(prompt.contains("Cells divide by mitosis."));
        assert!(prompt.contains("QUESTION:"));
        assert!(prompt.contains("CORRECT: [A or B or C or D]"));
        assert!(prompt.contains("---"));
        assert!(prompt.trim_end().ends_with("QUESTION:"));
    }

    #[test]
    fn test_flashcard_prompt_carries_notes_and_count() {
        let prompt = build_flashcard_prompt("Cells divide by mitosis.", 2);
        assert!(prompt.contains("Create 2 study flashcards"));
        assert!(prompt.contains("Q: [Question]"));
        assert!(prompt.contains("A: [Answer]"));
        assert!(prompt.trim_end().ends_with("Q:"));
    }

    #[test]
    fn test_params_differ_per_kind() {
        let mcq = params_for(QuizKind::MultipleChoice);
        let card = params_for(QuizKind::Flashcard);
        assert_eq!(mcq.max_new_tokens, 600);
        assert_eq!(card.max_new_tokens, 400);
        assert!(!mcq.return_full_text);
    }
}
