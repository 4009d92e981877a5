//! 笔记文件加载
//!
//! 从文件夹中扫描 .txt 笔记文件，单个文件读取失败只告警不中断。

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, warn};

/// 加载文件夹中所有 .txt 笔记文件
///
/// # 返回
/// 返回 (文件路径, 文件内容) 列表
pub async fn load_all_notes_files(folder_path: &str) -> Result<Vec<(PathBuf, String)>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut notes_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match fs::read_to_string(&path).await {
                Ok(content) => {
                    notes_files.push((path, content));
                }
                Err(e) => {
                    warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(notes_files)
}
