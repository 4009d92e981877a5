//! 兜底生成服务 - 业务能力层
//!
//! 生成服务不可用或其输出不可解析时，直接从笔记句子启发式地造题。
//! 形状是确定的，内容中的选词和选项顺序来自注入的随机源，测试时
//! 传入固定种子即可复现。

use phf::phf_set;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::question::{QuestionRecord, QuizKind};
use crate::services::text_service::SentenceSegmenter;
use crate::utils::truncate_text;

/// 挖空选择题要求句子词数严格大于此值
const MCQ_MIN_WORDS: usize = 6;
/// 闪卡要求句子词数严格大于此值
const CARD_MIN_WORDS: usize = 5;
/// 候选关键词的最小字符数（严格大于）
const KEY_WORD_MIN_CHARS: usize = 3;
/// 兜底保障题的句子预览长度
const PREVIEW_CHARS: usize = 50;

/// 选关键词时跳过的常见功能词
static EXCLUDED_WORDS: phf::Set<&'static str> = phf_set! {
    "the", "and", "or", "but", "with", "from", "they", "this", "that",
    "have", "been", "will", "were", "are", "is", "in", "on", "at",
    "to", "for", "of", "by", "as",
};

/// 定义类句子的提示词
const DEFINITION_CUES: [&str; 5] = ["is", "are", "means", "refers", "defines"];
/// 因果类句子的提示词
const CAUSAL_CUES: [&str; 4] = ["because", "since", "due to", "causes"];

/// 兜底生成器
pub struct FallbackGenerator {
    segmenter: SentenceSegmenter,
}

impl FallbackGenerator {
    pub fn new(segmenter: SentenceSegmenter) -> Self {
        Self { segmenter }
    }

    /// 从规范化笔记直接生成题目
    ///
    /// 按文档顺序最多取 `count` 个句子逐句出题；一个句子也出不了题
    /// 但笔记里确实有句子时，从第一个句子造一道保障题，确保只要有
    /// 句子就不会空手而归。
    pub fn generate<R: Rng>(
        &self,
        notes: &str,
        kind: QuizKind,
        count: usize,
        rng: &mut R,
    ) -> Vec<QuestionRecord> {
        match kind {
            QuizKind::MultipleChoice => self.multiple_choice(notes, count, rng),
            QuizKind::Flashcard => self.flashcards(notes, count),
        }
    }

    // ========== 选择题 ==========

    fn multiple_choice<R: Rng>(
        &self,
        notes: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<QuestionRecord> {
        let sentences: Vec<&str> = self.segmenter.split(notes).collect();

        let mut records = Vec::new();
        for sentence in sentences.iter().take(count) {
            if let Some(record) = self.blank_question(sentence, rng) {
                records.push(record);
            }
        }

        if records.is_empty() {
            if let Some(first) = sentences.first() {
                debug!("逐句出题失败，从第一个句子造保障题");
                records.extend(generic_multiple_choice(first));
            }
        }

        records
    }

    /// 从一个句子造一道挖空选择题
    ///
    /// 随机选一个重要词挖空作为题干，正确答案就是被挖掉的词，
    /// 干扰项由词形变换合成。句子太短或没有重要词时跳过。
    fn blank_question<R: Rng>(&self, sentence: &str, rng: &mut R) -> Option<QuestionRecord> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        if words.len() <= MCQ_MIN_WORDS {
            debug!("句子词数不足，跳过: {}", truncate_text(sentence, 40));
            return None;
        }

        let important: Vec<&str> = words
            .iter()
            .copied()
            .filter(|w| {
                w.chars().count() > KEY_WORD_MIN_CHARS
                    && !EXCLUDED_WORDS.contains(w.to_lowercase().as_str())
            })
            .collect();

        let key_word = match important.choose(rng) {
            Some(word) => *word,
            None => {
                debug!("句子中没有重要词，跳过: {}", truncate_text(sentence, 40));
                return None;
            }
        };

        let prompt_text = format!(
            "Fill in the blank: {}",
            sentence.replacen(key_word, "______", 1)
        );

        let mut options = distinct_options(key_word);
        options.shuffle(rng);
        let correct_index = options.iter().position(|o| o == key_word)?;

        QuestionRecord::multiple_choice(prompt_text, options, correct_index).ok()
    }

    // ========== 闪卡 ==========

    fn flashcards(&self, notes: &str, count: usize) -> Vec<QuestionRecord> {
        let sentences: Vec<&str> = self.segmenter.split(notes).collect();

        let mut records = Vec::new();
        for sentence in sentences.iter().take(count) {
            if let Some(record) = card_question(sentence) {
                records.push(record);
            }
        }

        if records.is_empty() {
            if let Some(first) = sentences.first() {
                debug!("逐句出题失败，从第一个句子造保障闪卡");
                records.extend(
                    QuestionRecord::flashcard(
                        "What is the key information from your notes?",
                        *first,
                    )
                    .ok(),
                );
            }
        }

        records
    }
}

/// 正确答案 + 3 个互不相同的干扰项
///
/// 干扰项按顺序尝试三种词形变换：单复数互换、加/去 un- 前缀、
/// `_related` 后缀。个别变换撞车时用编号后缀补齐到 4 个。
fn distinct_options(key_word: &str) -> Vec<String> {
    let lower = key_word.to_lowercase();

    let mut candidates = Vec::new();
    if key_word.ends_with('s') && key_word.chars().count() > 3 {
        candidates.push(key_word[..key_word.len() - 1].to_string());
    } else {
        candidates.push(format!("{}s", key_word));
    }
    if lower.starts_with("un") {
        candidates.push(key_word[2..].to_string());
    } else {
        candidates.push(format!("un{}", lower));
    }
    candidates.push(format!("{}_related", lower));

    let mut options = vec![key_word.to_string()];
    for candidate in candidates {
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    let mut n = 2;
    while options.len() < 4 {
        let filler = format!("{}_{}", lower, n);
        if !options.contains(&filler) {
            options.push(filler);
        }
        n += 1;
    }

    options
}

/// 保障题：第一个句子的预览作为唯一正确选项
fn generic_multiple_choice(first_sentence: &str) -> Option<QuestionRecord> {
    let preview = truncate_text(first_sentence, PREVIEW_CHARS);

    let mut options = vec![preview];
    for canned in [
        "This is incorrect information",
        "The opposite is true",
        "This is partially correct",
        "None of the above",
    ] {
        if options.len() == 4 {
            break;
        }
        if !options.iter().any(|o| o == canned) {
            options.push(canned.to_string());
        }
    }

    QuestionRecord::multiple_choice(
        "Based on your notes, which statement is correct?",
        options,
        0,
    )
    .ok()
}

/// 从一个句子造一张闪卡
///
/// 按提示词给句子归类（与原句小写后做子串匹配）：定义类、因果类、
/// 其余用通用模板。答案永远是完整句子。
fn card_question(sentence: &str) -> Option<QuestionRecord> {
    if sentence.split_whitespace().count() <= CARD_MIN_WORDS {
        debug!("句子词数不足，跳过: {}", truncate_text(sentence, 40));
        return None;
    }

    let lower = sentence.to_lowercase();
    let prompt_text = if DEFINITION_CUES.iter().any(|cue| lower.contains(cue)) {
        "What is defined or described in this statement?"
    } else if CAUSAL_CUES.iter().any(|cue| lower.contains(cue)) {
        "What cause and effect relationship is described?"
    } else {
        "What is the main concept explained here?"
    };

    QuestionRecord::flashcard(prompt_text, sentence).ok()
}
