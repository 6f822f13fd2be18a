use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, RANGE};
use tracing::debug;

use crate::internal::transfer::structs::TransferError;
use crate::internal::transfer::traits::range_client::range_header;
use crate::internal::transfer::traits::{RangeClient, RangeResponse};

/// 基于 reqwest 的默认客户端。
#[derive(Debug, Clone, Default)]
pub struct ReqwestRangeClient {
    client: Client,
}

impl ReqwestRangeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 复用外部配置好的 `Client`（代理、超时等）
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RangeClient for ReqwestRangeClient {
    async fn fetch_range(
        &self,
        url: &str,
        start: u64,
        end: u64,
    ) -> Result<RangeResponse, TransferError> {
        let range = range_header(start, end);
        debug!("GET {} Range: {}", url, range);

        let response = self.client.get(url).header(RANGE, range).send().await?;

        let status = response.status().as_u16();
        let headers = response.headers();
        let content_range = headers
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response.bytes().await?;

        Ok(RangeResponse {
            status,
            content_range,
            content_length,
            body,
        })
    }
}
