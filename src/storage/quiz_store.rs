//! 测验存储
//!
//! 每份测验存成一个 TOML 文档，文件名就是测验的不透明标识。
//! 选项顺序和正确答案索引必须原样经过文本序列化往返。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::models::question::{QuestionRecord, QuizKind};

/// 一份已存储的测验
///
/// `questions` 必须是最后一个字段，TOML 的表数组要排在普通键之后。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuiz {
    pub id: String,
    pub kind: QuizKind,
    pub created_at: String,
    pub notes: String,
    pub questions: Vec<QuestionRecord>,
}

/// 测验存储服务
pub struct QuizStore {
    folder: PathBuf,
}

impl QuizStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// 保存一份测验，返回其不透明标识
    pub async fn save(
        &self,
        notes: &str,
        kind: QuizKind,
        questions: &[QuestionRecord],
    ) -> Result<String> {
        fs::create_dir_all(&self.folder)
            .await
            .with_context(|| format!("无法创建测验目录: {}", self.folder.display()))?;

        let now = chrono::Local::now();
        let id = format!("quiz-{}", now.format("%Y%m%d-%H%M%S%.3f"));

        let stored = StoredQuiz {
            id: id.clone(),
            kind,
            created_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            notes: notes.to_string(),
            questions: questions.to_vec(),
        };

        let content = toml::to_string_pretty(&stored).context("无法序列化测验")?;
        let path = self.path_for(&id);
        fs::write(&path, content)
            .await
            .with_context(|| format!("无法写入测验文件: {}", path.display()))?;

        info!("✓ 测验已保存: {} ({} 题)", id, questions.len());
        Ok(id)
    }

    /// 按标识读取测验，不存在时返回 `None`
    pub async fn load(&self, id: &str) -> Result<Option<StoredQuiz>> {
        let path = self.path_for(id);
        if !path.exists() {
            debug!("测验不存在: {}", id);
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("无法读取测验文件: {}", path.display()))?;
        let stored: StoredQuiz = toml::from_str(&content)
            .with_context(|| format!("无法解析测验文件: {}", path.display()))?;

        Ok(Some(stored))
    }

    fn path_for(&self, id: &str) -> PathBuf {
        Path::new(&self.folder).join(format!("{}.toml", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> QuizStore {
        let folder = std::env::temp_dir().join(format!("quiz_store_test_{}_{}", tag, std::process::id()));
        QuizStore::new(folder)
    }

    #[tokio::test]
    async fn test_round_trip_preserves_options_and_index() {
        let store = temp_store("roundtrip");
        let questions = vec![
            QuestionRecord::multiple_choice(
                "Fill in the blank: The ______ is the powerhouse of the cell",
                vec![
                    "mitochondria".to_string(),
                    "mitochondrias".to_string(),
                    "unmitochondria".to_string(),
                    "mitochondria_related".to_string(),
                ],
                2,
            )
            .unwrap(),
            QuestionRecord::multiple_choice(
                "Which organelle stores DNA?",
                vec![
                    "nucleus".to_string(),
                    "ribosome".to_string(),
                    "vacuole".to_string(),
                    "membrane".to_string(),
                ],
                0,
            )
            .unwrap(),
        ];

        let id = store
            .save("some notes", QuizKind::MultipleChoice, &questions)
            .await
            .unwrap();

        let loaded = store.load(&id).await.unwrap().expect("测验应该存在");
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.kind, QuizKind::MultipleChoice);
        assert_eq!(loaded.questions.len(), 2);
        // 选项顺序和正确索引原样往返
        assert_eq!(loaded.questions[0].options(), questions[0].options());
        assert_eq!(loaded.questions[0].correct_index(), Some(2));
        assert_eq!(loaded.questions[1].correct_index(), Some(0));
        assert_eq!(loaded.questions, questions);
    }

    #[tokio::test]
    async fn test_flashcard_round_trip() {
        let store = temp_store("flashcard");
        let questions = vec![QuestionRecord::flashcard(
            "What is defined or described in this statement?",
            "The mitochondria is the powerhouse of the cell",
        )
        .unwrap()];

        let id = store
            .save("notes", QuizKind::Flashcard, &questions)
            .await
            .unwrap();
        let loaded = store.load(&id).await.unwrap().unwrap();
        assert_eq!(loaded.questions, questions);
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let store = temp_store("missing");
        assert!(store.load("quiz-00000000-000000.000").await.unwrap().is_none());
    }
}
