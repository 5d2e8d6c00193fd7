use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// 读取原文的原始字节
///
/// 不在这里做 UTF-8 转换，交给 `SourceText::from_bytes` 统一判断
pub async fn load_source_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("无法读取原文文件: {}", path.display()))?;

    tracing::info!(
        "已加载原文: {} ({} 字节)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        bytes.len()
    );

    Ok(bytes)
}

/// 从标准输入读取原文
pub async fn load_source_from_stdin() -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut bytes)
        .await
        .context("无法从标准输入读取原文")?;

    tracing::info!("已从标准输入读取原文 ({} 字节)", bytes.len());

    Ok(bytes)
}
