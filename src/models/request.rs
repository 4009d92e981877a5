use serde::Deserialize;

use crate::models::question::QuizKind;

/// 一次测验生成请求
///
/// `notes_text` 规范化后必须在 30–5000 字符之间；`count` 会被引擎
/// 收敛到 1–10。
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// 原始笔记文本
    pub notes_text: String,
    /// 题目类型
    pub kind: QuizKind,
    /// 期望的题目数量
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    5
}

impl GenerationRequest {
    pub fn new(notes_text: impl Into<String>, kind: QuizKind, count: usize) -> Self {
        Self {
            notes_text: notes_text.into(),
            kind,
            count,
        }
    }
}
