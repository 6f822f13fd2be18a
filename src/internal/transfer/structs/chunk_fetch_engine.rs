use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::artifact::Artifact;
use super::content_range::parse_content_range;
use super::engine_config::EngineConfig;
use super::progress_snapshot::ProgressSnapshot;
use super::reassembler::Reassembler;
use super::terminal_state::TerminalState;
use super::transfer_error::TransferError;
use crate::internal::range_store::structs::{SessionKey, SessionRecords};
use crate::internal::range_store::traits::RangeStore;
use crate::internal::transfer::traits::{RangeClient, RangeResponse};
use crate::states::unlock_reactive::UnlockReactiveProperty;

/// 校验通过、等待落盘的一次响应
#[derive(Debug)]
struct AcceptedChunk {
    total_size: u64,
    /// `(偏移, 数据)`，按 `chunk_size` 切好
    pieces: Vec<(u64, Bytes)>,
    next_offset: u64,
}

/// 单连接、逐块的下载引擎。
///
/// 每一块都先写分片、再推进偏移，两者都落盘后才发起下一块请求，
/// 所以进程任何时刻退出，重启后都能从最后记录的偏移继续。
pub struct ChunkFetchEngine {
    client: Arc<dyn RangeClient>,
    records: SessionRecords,
    session: SessionKey,
    config: EngineConfig,
    progress: UnlockReactiveProperty<ProgressSnapshot>,
}

impl ChunkFetchEngine {
    pub fn new(
        client: Arc<dyn RangeClient>,
        store: Arc<dyn RangeStore>,
        session: SessionKey,
        config: EngineConfig,
    ) -> Self {
        Self {
            client,
            records: SessionRecords::new(store),
            session,
            config,
            progress: UnlockReactiveProperty::new(ProgressSnapshot::default()),
        }
    }

    /// 把进度发布到外部持有的属性上
    pub fn with_progress(mut self, progress: UnlockReactiveProperty<ProgressSnapshot>) -> Self {
        self.progress = progress;
        self
    }

    pub fn progress(&self) -> UnlockReactiveProperty<ProgressSnapshot> {
        self.progress.clone()
    }

    pub fn session(&self) -> &SessionKey {
        &self.session
    }

    pub fn records(&self) -> &SessionRecords {
        &self.records
    }

    fn chunk_size(&self) -> u64 {
        self.config.chunk_size.max(1)
    }

    /// 从已记录的偏移开始下载，直到完成、出错或 `token` 被取消。
    pub async fn run(&self, token: &CancellationToken) -> TerminalState {
        match self.drive(token).await {
            Ok(artifact) => TerminalState::Completed(artifact),
            Err(TransferError::Cancelled) => {
                let offset = self.progress.map(|p| p.offset);
                debug!("{} 在偏移 {} 处暂停", self.session.file_name, offset);
                TerminalState::Cancelled { offset }
            }
            Err(e) if e.is_fatal() => {
                warn!("{} 下载失败: {}", self.session.file_name, e);
                self.mark_failed(&e).await;
                TerminalState::Failed(e)
            }
            Err(e) => {
                warn!("{} 下载中断，可续传: {}", self.session.file_name, e);
                TerminalState::Paused(e)
            }
        }
    }

    async fn drive(&self, token: &CancellationToken) -> Result<Artifact, TransferError> {
        if let Some(reason) = self.records.load_failure().await? {
            return Err(TransferError::SessionFailed(reason));
        }

        let mut offset = self.records.load_offset().await?;
        let mut total_size = self.records.load_total_size().await?;
        self.publish(offset, total_size);
        if offset > 0 {
            info!("{} 从偏移 {} 继续下载", self.session.file_name, offset);
        }

        let chunk_size = self.chunk_size();
        loop {
            if total_size.is_some_and(|total| offset >= total) {
                break;
            }
            if token.is_cancelled() {
                return Err(TransferError::Cancelled);
            }

            let end = offset.saturating_add(chunk_size - 1);
            let response = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(TransferError::Cancelled),
                response = self.client.fetch_range(&self.session.url, offset, end) => response?,
            };

            let accepted = self.accept(offset, total_size, &response)?;

            // 取消之后才到达的响应一律丢弃，不落盘
            if token.is_cancelled() {
                debug!("丢弃取消后到达的分片 [{}-{}]", offset, end);
                return Err(TransferError::Cancelled);
            }

            if total_size.is_none() {
                self.records.save_total_size(accepted.total_size).await?;
                total_size = Some(accepted.total_size);
            }
            for (piece_offset, bytes) in &accepted.pieces {
                self.records.save_chunk(*piece_offset, bytes).await?;
            }
            self.records.save_offset(accepted.next_offset).await?;

            debug!(
                "{} 已写入 [{}, {})，共 {} 字节",
                self.session.file_name,
                offset,
                accepted.next_offset,
                accepted.total_size
            );
            offset = accepted.next_offset;
            self.publish(offset, total_size);
        }

        let total_size = total_size.unwrap_or(offset);
        Reassembler::new(&self.records, chunk_size)
            .assemble(&self.session.file_name, total_size)
            .await
    }

    /// 校验状态码、总大小和区间，得到待写入的分片。纯函数，不碰存储。
    fn accept(
        &self,
        offset: u64,
        known_total: Option<u64>,
        response: &RangeResponse,
    ) -> Result<AcceptedChunk, TransferError> {
        match response.status {
            200 | 206 => {}
            404 => return Err(TransferError::NotFound),
            416 => {
                let Some(total_size) = response
                    .content_range
                    .as_deref()
                    .and_then(parse_content_range)
                    .and_then(|range| range.total)
                else {
                    return Err(TransferError::UnexpectedStatus(416));
                };
                // `bytes */<size>` 里的大小同样不能与已记录的总大小冲突
                check_total(known_total, total_size)?;

                // 空文件对任何区间都回 416 `bytes */0`
                if offset == 0 && total_size == 0 {
                    return Ok(AcceptedChunk {
                        total_size: 0,
                        pieces: Vec::new(),
                        next_offset: 0,
                    });
                }
                return Err(TransferError::UnexpectedStatus(416));
            }
            status => return Err(TransferError::UnexpectedStatus(status)),
        }

        let content_range = match response.content_range.as_deref() {
            Some(raw) => Some(parse_content_range(raw).ok_or_else(|| {
                TransferError::MalformedResponse(format!("无法解析 Content-Range: {}", raw))
            })?),
            None => None,
        };

        let body = &response.body;
        let body_len = body.len() as u64;

        let total_size = match content_range.and_then(|range| range.total) {
            Some(total) => total,
            None if response.status == 200 => response.content_length.unwrap_or(body_len),
            None => {
                return Err(TransferError::MalformedResponse(
                    "206 响应缺少文件总大小".to_string(),
                ));
            }
        };
        check_total(known_total, total_size)?;

        if response.status == 206 {
            let (start, end) = content_range
                .and_then(|range| range.span)
                .ok_or_else(|| {
                    TransferError::MalformedResponse("206 响应缺少区间".to_string())
                })?;
            if start != offset {
                return Err(TransferError::MalformedResponse(format!(
                    "请求偏移 {}，服务器返回偏移 {}",
                    offset, start
                )));
            }

            let expected = total_size.saturating_sub(offset).min(self.chunk_size());
            if expected == 0 || body_len != expected || end - start + 1 != body_len {
                return Err(TransferError::MalformedResponse(format!(
                    "分片 [{}-{}] 长度为 {} 字节，应为 {} 字节",
                    start, end, body_len, expected
                )));
            }

            return Ok(AcceptedChunk {
                total_size,
                pieces: vec![(offset, body.clone())],
                next_offset: offset + body_len,
            });
        }

        // 200：服务器忽略了 Range，只有从头下载时才能接收
        if offset != 0 {
            return Err(TransferError::RangeNotSupported);
        }
        if body_len != total_size {
            return Err(TransferError::MalformedResponse(format!(
                "整体响应长度为 {} 字节，应为 {} 字节",
                body_len, total_size
            )));
        }

        let chunk_size = self.chunk_size();
        let mut pieces = Vec::new();
        let mut start = 0u64;
        while start < total_size {
            let stop = start.saturating_add(chunk_size).min(total_size);
            pieces.push((start, body.slice(start as usize..stop as usize)));
            start = stop;
        }

        Ok(AcceptedChunk {
            total_size,
            pieces,
            next_offset: total_size,
        })
    }

    /// 致命错误写入失败标记，重启后也要先重置才能继续。
    async fn mark_failed(&self, error: &TransferError) {
        // 标记本身就是拒绝继续的原因，不必重写
        if matches!(error, TransferError::SessionFailed(_)) {
            return;
        }
        if let Err(e) = self.records.save_failure(&error.to_string()).await {
            warn!("{} 写入失败标记失败: {}", self.session.file_name, e);
        }
    }

    fn publish(&self, offset: u64, total_size: Option<u64>) {
        self.progress.update(ProgressSnapshot::new(offset, total_size));
    }
}

/// 会话一旦记录了总大小就不可再变
fn check_total(known_total: Option<u64>, actual: u64) -> Result<(), TransferError> {
    match known_total {
        Some(expected) if expected != actual => {
            Err(TransferError::TotalSizeMismatch { expected, actual })
        }
        _ => Ok(()),
    }
}
