//! 传输相关错误类型。

use thiserror::Error;

use crate::internal::range_store::structs::StoreError;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("文件不存在")]
    NotFound,

    #[error("服务器返回了意外的状态码: {0}")]
    UnexpectedStatus(u16),

    #[error("文件大小已变化：记录为 {expected} 字节，服务器返回 {actual} 字节")]
    TotalSizeMismatch { expected: u64, actual: u64 },

    #[error("缺少偏移 {offset} 处的分片")]
    MissingChunk { offset: u64 },

    #[error("重组后长度为 {actual} 字节，应为 {expected} 字节")]
    AssemblyLength { expected: u64, actual: u64 },

    #[error("会话已失效，需要重置: {0}")]
    SessionFailed(String),

    #[error("下载被暂停")]
    Cancelled,

    #[error("服务器不支持 Range 请求")]
    RangeNotSupported,

    #[error("响应格式异常: {0}")]
    MalformedResponse(String),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("下载地址无效: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("存储失败: {0}")]
    Store(#[from] StoreError),

    #[error("保存文件失败: {0}")]
    SaveFile(std::io::Error),
}

impl TransferError {
    /// 致命错误：会话必须重置后才能重新下载；其余错误保留进度，可直接续传。
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TransferError::TotalSizeMismatch { .. }
                | TransferError::MissingChunk { .. }
                | TransferError::AssemblyLength { .. }
                | TransferError::SessionFailed(_)
        )
    }
}
