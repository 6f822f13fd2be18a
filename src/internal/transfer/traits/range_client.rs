use async_trait::async_trait;
use bytes::Bytes;

use crate::internal::transfer::structs::TransferError;

/// 一次分段请求的响应，响应体已完整读入内存。
#[derive(Debug, Clone)]
pub struct RangeResponse {
    pub status: u16,
    pub content_range: Option<String>,
    pub content_length: Option<u64>,
    pub body: Bytes,
}

/// 发起 `Range: bytes=<start>-<end>` 请求的 HTTP 客户端。
///
/// 要么返回完整的响应体，要么返回错误，不会交出读了一半的数据。
#[async_trait]
pub trait RangeClient: Send + Sync {
    async fn fetch_range(
        &self,
        url: &str,
        start: u64,
        end: u64,
    ) -> Result<RangeResponse, TransferError>;
}

/// 闭区间 `[start, end]` 的请求头
pub fn range_header(start: u64, end: u64) -> String {
    format!("bytes={}-{}", start, end)
}
