//! 音频文件加载器
//!
//! 扫描指定目录，把其中的音频文件读入内存并打上 MIME 类型标签。
//! 非音频文件会被跳过并记录警告。

use std::path::Path;

use mime_guess::mime;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{AppResult, FileError};
use crate::models::WorkItem;

/// 加载目录下的所有音频文件
///
/// 返回的列表按文件名排序，保证多次运行的处理顺序一致。
pub async fn load_audio_files(folder: &str) -> AppResult<Vec<WorkItem>> {
    let dir = Path::new(folder);
    if !dir.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder.to_string(),
        }
        .into());
    }

    let mut entries = fs::read_dir(dir).await.map_err(|e| FileError::ReadFailed {
        path: folder.to_string(),
        source: Box::new(e),
    })?;

    let mut items = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(|e| FileError::ReadFailed {
        path: folder.to_string(),
        source: Box::new(e),
    })? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();

        // 根据扩展名推断 MIME 类型，跳过非音频文件
        let mime_type = match mime_guess::from_path(&path).first() {
            Some(m) if m.type_() == mime::AUDIO => m.essence_str().to_string(),
            Some(m) => {
                warn!("⚠️ 跳过非音频文件: {} ({})", file_name, m.essence_str());
                continue;
            }
            None => {
                warn!("⚠️ 跳过无法识别类型的文件: {}", file_name);
                continue;
            }
        };

        let bytes = fs::read(&path).await.map_err(|e| FileError::ReadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        debug!("已加载 {} ({}, {} 字节)", file_name, mime_type, bytes.len());
        items.push(WorkItem::new(file_name, bytes, mime_type));
    }

    items.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(items)
}
