//! 试卷文件夹发现服务
//!
//! ETS 根目录下每份试卷占一个文件夹，试卷内部是 content_<n> 子文件夹。

use crate::error::AppError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 一个候选试卷文件夹及其创建时间
#[derive(Debug, Clone)]
pub struct PaperFolder {
    pub path: PathBuf,
    pub name: String,
    pub created: SystemTime,
}

/// 列出根目录下的试卷文件夹，按创建时间从新到旧排序
///
/// 创建时间不可用的文件系统上退回修改时间，排序约定不变。
pub fn list_paper_folders(root: &Path) -> Result<Vec<PaperFolder>> {
    if !root.exists() {
        return Err(AppError::DirectoryNotFound {
            path: root.display().to_string(),
        }
        .into());
    }

    let mut folders = Vec::new();
    let entries =
        std::fs::read_dir(root).with_context(|| format!("无法读取文件夹: {}", root.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let metadata = entry.metadata()?;
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        folders.push(PaperFolder {
            name: entry.file_name().to_string_lossy().to_string(),
            path,
            created,
        });
    }

    folders.sort_by(|a, b| b.created.cmp(&a.created));
    Ok(folders)
}

/// 列出试卷文件夹下的 content_<n> 子文件夹，按数字后缀升序排序
///
/// 不符合 content_<n> 命名的条目忽略。
pub fn sorted_content_folders(paper_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(paper_dir)
        .with_context(|| format!("无法读取文件夹: {}", paper_dir.display()))?;

    let mut indexed = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(n) = content_index(&name) {
            indexed.push((n, entry.path()));
        }
    }

    indexed.sort_by_key(|(n, _)| *n);
    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}

/// 从 "content_<n>" 中取数字后缀
fn content_index(name: &str) -> Option<u32> {
    name.strip_prefix("content_")?.parse().ok()
}
