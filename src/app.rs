//! 应用编排层
//!
//! 扫描笔记目录，为每份笔记生成一份测验并保存，输出统计信息。
//! 单份笔记失败只计数，不中断整批处理。

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::clients::HuggingFaceClient;
use crate::config::Config;
use crate::engine::QuizEngine;
use crate::error::QuizError;
use crate::models::question::QuizKind;
use crate::models::request::GenerationRequest;
use crate::storage::{load_all_notes_files, QuizStore};
use crate::utils::truncate_text;

/// 应用主结构
pub struct App {
    config: Config,
    engine: QuizEngine,
    client: Option<HuggingFaceClient>,
    store: QuizStore,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = if config.hf_api_key.is_empty() {
            warn!("⚠️ 未配置 HF_API_KEY，所有测验将使用兜底生成");
            None
        } else {
            info!("✅ 生成服务已启用: {}", config.hf_model_name);
            Some(HuggingFaceClient::new(&config).context("无法初始化生成服务客户端")?)
        };

        let engine = QuizEngine::new(&config);
        let store = QuizStore::new(config.quiz_folder.clone());

        Ok(Self {
            config,
            engine,
            client,
            store,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let kind = QuizKind::from_str(&self.config.quiz_kind).ok_or_else(|| {
            QuizError::unsupported_kind(self.config.quiz_kind.clone())
        })?;

        info!("\n📁 正在扫描待处理的笔记...");
        let notes_files = load_all_notes_files(&self.config.notes_folder).await?;

        if notes_files.is_empty() {
            warn!("⚠️ 没有找到待处理的笔记文件，程序结束");
            return Ok(());
        }

        info!("✓ 找到 {} 份笔记", notes_files.len());

        let mut stats = ProcessingStats {
            total: notes_files.len(),
            ..Default::default()
        };
        let mut rng = rand::thread_rng();

        for (index, (path, content)) in notes_files.iter().enumerate() {
            let notes_index = index + 1;
            info!("\n[笔记 {}] {}", notes_index, "─".repeat(30));
            info!(
                "[笔记 {}] 文件: {}",
                notes_index,
                path.file_name().unwrap_or_default().to_string_lossy()
            );
            if self.config.verbose_logging {
                info!("[笔记 {}] 内容: {}", notes_index, truncate_text(content, 80));
            }

            let request =
                GenerationRequest::new(content.clone(), kind, self.config.question_count);

            match self
                .engine
                .generate(&request, self.client.as_ref(), &mut rng)
                .await
            {
                Ok(records) => {
                    let id = self.store.save(content, kind, &records).await?;
                    info!(
                        "[笔记 {}] ✓ 生成 {} 题, 已保存为 {}",
                        notes_index,
                        records.len(),
                        id
                    );
                    stats.success += 1;
                }
                Err(e) => {
                    error!("[笔记 {}] ❌ 生成失败: {}", notes_index, e);
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(&stats);

        Ok(())
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 笔记测验生成");
    info!("📊 题目类型: {}, 每份 {} 题", config.quiz_kind, config.question_count);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}
