use std::path::PathBuf;

use thiserror::Error;

/// 翻译目录加载错误
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 所有来源都没有该 locale 的目录
    #[error("No translation catalog found for locale '{locale}'")]
    ResourceNotFound { locale: String },

    /// 目录存在但结构无法解析
    #[error("Malformed translation catalog {origin} (line {line}): {reason}")]
    MalformedResource {
        origin: String,
        line: usize,
        reason: String,
    },

    /// 读取文件失败
    #[error("Failed to read translation catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// 是否为“未找到”而非“文件损坏”
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::ResourceNotFound { .. })
    }
}
