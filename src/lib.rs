//! # Quiz Generator
//!
//! 把自由格式的学习笔记转换成结构化测验（四选一选择题或问答闪卡）
//!
//! ## 架构设计
//!
//! 本系统采用三层架构：
//!
//! ### ① 业务能力层（Services / Clients）
//! - `services/text_service` - 文本清洗与句子切分能力
//! - `services/response_parser` - 生成文本的防御性解析能力
//! - `services/fallback_generator` - 无外部依赖的兜底出题能力
//! - `clients/` - 生成服务的调用能力（`TextGenerator` 注入点）
//!
//! ### ② 流程层（Engine）
//! - `engine` - 一次测验生成的完整流程编排：
//!   规范化 → 提示词 → 生成服务 → 解析 → 兜底 → 截断
//!
//! ### ③ 编排层（App）
//! - `app` - 扫描笔记目录、逐份生成、持久化、统计
//!
//! ## 两级生成策略
//!
//! 生成服务是尽力而为的：调用失败、超时、返回的文本解析不出题目，
//! 都会静默改用兜底生成。兜底生成只依赖笔记本身的句子，保证了
//! 只要输入合法就一定有结果。

pub mod app;
pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod services;
pub mod storage;
pub mod utils;

// 重新导出常用类型
pub use clients::{GenerationParams, HuggingFaceClient, TextGenerator};
pub use config::Config;
pub use engine::QuizEngine;
pub use error::{GenerationError, QuizError, QuizResult};
pub use models::{GenerationRequest, QuestionRecord, QuizKind};
pub use services::{FallbackGenerator, ResponseParser, SentenceSegmenter};
pub use storage::{QuizStore, StoredQuiz};
