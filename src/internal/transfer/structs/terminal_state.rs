use super::artifact::Artifact;
use super::transfer_error::TransferError;

/// 一次 [`run`](super::ChunkFetchEngine::run) 的结局，错误不会越过引擎边界抛出。
#[derive(Debug)]
pub enum TerminalState {
    /// 全部分片到齐并已重组，会话记录已清空
    Completed(Artifact),
    /// 取消令牌被触发；`offset` 为已持久化的进度
    Cancelled { offset: u64 },
    /// 可恢复的错误，进度保留，可以再次启动续传
    Paused(TransferError),
    /// 致命错误，需要重置会话
    Failed(TransferError),
}
