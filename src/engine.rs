//! 测验生成引擎 - 流程层
//!
//! 核心职责：编排一次完整的测验生成
//!
//! 流程顺序：
//! 1. 规范化并校验笔记
//! 2. 构建提示词 → 调用生成服务 → 解析
//! 3. 任何失败或零条结果 → 兜底生成（保障不空手）
//!
//! 两级策略是这里的中心设计：生成服务是尽力而为的，兜底生成保证
//! 只要笔记里有合格句子就一定给出结果。对调用方来说，失败只可能
//! 来自输入本身。

use rand::Rng;
use tracing::{debug, info, warn};

use crate::clients::TextGenerator;
use crate::config::Config;
use crate::error::{FallbackReason, QuizError, QuizResult};
use crate::models::question::{QuestionRecord, QuizKind};
use crate::models::request::GenerationRequest;
use crate::prompt;
use crate::services::{FallbackGenerator, ResponseParser, SentenceSegmenter};

/// 规范化后笔记的最小字符数
pub const MIN_NOTES_CHARS: usize = 30;
/// 规范化后笔记的最大字符数
pub const MAX_NOTES_CHARS: usize = 5000;
/// 单次请求的题目数量上限
pub const MAX_QUESTION_COUNT: usize = 10;

/// 测验生成引擎
///
/// 无状态：每次调用独立，不持有跨调用的可变数据，多个调用可以
/// 各自并发执行。每次调用最多发起一次生成服务请求，失败不重试。
pub struct QuizEngine {
    parser: ResponseParser,
    fallback: FallbackGenerator,
}

impl QuizEngine {
    /// 创建新的引擎
    pub fn new(config: &Config) -> Self {
        let segmenter = SentenceSegmenter::new(config.min_sentence_words);
        Self {
            parser: ResponseParser::new(),
            fallback: FallbackGenerator::new(segmenter),
        }
    }

    /// 生成一份测验
    ///
    /// # 参数
    /// - `request`: 笔记文本、题目类型和期望数量（收敛到 1–10）
    /// - `backend`: 注入的生成能力，`None` 表示直接兜底生成
    /// - `rng`: 兜底生成使用的随机源
    ///
    /// # 返回
    /// 按顺序返回至多 `count` 条题目记录。结果可能少于 `count`
    /// （只截断，从不凑数），这是正常结果而非错误。
    pub async fn generate<G, R>(
        &self,
        request: &GenerationRequest,
        backend: Option<&G>,
        rng: &mut R,
    ) -> QuizResult<Vec<QuestionRecord>>
    where
        G: TextGenerator,
        R: Rng,
    {
        let notes = crate::services::text_service::normalize(&request.notes_text);
        let chars = notes.chars().count();
        if chars < MIN_NOTES_CHARS {
            return Err(QuizError::input_too_short(chars, MIN_NOTES_CHARS));
        }
        if chars > MAX_NOTES_CHARS {
            return Err(QuizError::InputTooLong {
                chars,
                max: MAX_NOTES_CHARS,
            });
        }

        let count = request.count.clamp(1, MAX_QUESTION_COUNT);

        let records = match backend {
            None => {
                info!("未配置生成服务，直接使用兜底生成");
                self.fallback.generate(&notes, request.kind, count, rng)
            }
            Some(backend) => match self.try_generate(&notes, request.kind, count, backend).await {
                Ok(records) => records,
                Err(reason) => {
                    warn!("⚠️ {}，改用兜底生成", reason);
                    self.fallback.generate(&notes, request.kind, count, rng)
                }
            },
        };

        if records.is_empty() {
            return Err(QuizError::NoUsableSentences);
        }

        Ok(records.into_iter().take(count).collect())
    }

    /// 单次生成服务调用 + 解析
    ///
    /// 调用失败和解析出零条记录都归为 [`FallbackReason`]，由上层
    /// 吸收，绝不向调用方传播。
    async fn try_generate<G: TextGenerator>(
        &self,
        notes: &str,
        kind: QuizKind,
        count: usize,
        backend: &G,
    ) -> Result<Vec<QuestionRecord>, FallbackReason> {
        info!("🤖 正在调用生成服务 ({} 题, 类型: {})...", count, kind);

        let prompt = prompt::build_prompt(kind, notes, count);
        let params = prompt::params_for(kind);

        let text = backend
            .generate_text(&prompt, &params)
            .await
            .map_err(FallbackReason::GenerationUnavailable)?;

        debug!("生成服务返回 {} 字符，开始解析", text.len());

        let records = match kind {
            QuizKind::MultipleChoice => self.parser.parse_mcq(&text),
            QuizKind::Flashcard => self.parser.parse_flashcards(&text),
        };

        if records.is_empty() {
            return Err(FallbackReason::ParseYieldedNothing);
        }

        info!("✓ 从生成文本中解析出 {} 条题目", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine() -> QuizEngine {
        QuizEngine::new(&Config::default())
    }

    fn request(notes: &str, kind: QuizKind, count: usize) -> GenerationRequest {
        GenerationRequest::new(notes, kind, count)
    }

    /// 引擎校验在任何生成路径之前，用不到真实的生成能力
    struct NeverCalled;

    impl TextGenerator for NeverCalled {
        async fn generate_text(
            &self,
            _prompt: &str,
            _params: &crate::clients::GenerationParams,
        ) -> Result<String, crate::error::GenerationError> {
            panic!("不应该走到生成服务调用");
        }
    }

    #[tokio::test]
    async fn test_rejects_29_chars_accepts_30() {
        let mut rng = StdRng::seed_from_u64(0);

        // 恰好 29 个字符
        let short = "Cell walls guard plant cells.";
        assert_eq!(short.chars().count(), 29);
        let result = engine()
            .generate(
                &request(short, QuizKind::Flashcard, 2),
                None::<&NeverCalled>,
                &mut rng,
            )
            .await;
        assert!(matches!(
            result,
            Err(QuizError::InputTooShort { chars: 29, min: 30 })
        ));

        // 恰好 30 个字符，且有一个合格句子
        let enough = "Cell walls guard plant cells..";
        assert_eq!(enough.chars().count(), 30);
        let records = engine()
            .generate(
                &request(enough, QuizKind::Flashcard, 2),
                None::<&NeverCalled>,
                &mut rng,
            )
            .await
            .unwrap();
        assert!(!records.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_over_long_notes() {
        let mut rng = StdRng::seed_from_u64(0);
        let long = "word ".repeat(1200);
        let result = engine()
            .generate(
                &request(&long, QuizKind::Flashcard, 2),
                None::<&NeverCalled>,
                &mut rng,
            )
            .await;
        assert!(matches!(result, Err(QuizError::InputTooLong { .. })));
    }

    #[tokio::test]
    async fn test_no_usable_sentences() {
        let mut rng = StdRng::seed_from_u64(0);
        // 长度合格但每个句子都不足 4 词
        let notes = "One two. Three four. Five six. Seven eight. Nine.";
        let result = engine()
            .generate(
                &request(notes, QuizKind::MultipleChoice, 2),
                None::<&NeverCalled>,
                &mut rng,
            )
            .await;
        assert!(matches!(result, Err(QuizError::NoUsableSentences)));
    }
}
