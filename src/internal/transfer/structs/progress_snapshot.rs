/// 下载进度快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// 已持久化的字节数（即下一个待请求的偏移）
    pub offset: u64,
    /// 文件总大小，收到第一个响应前未知
    pub total_size: Option<u64>,
}

impl ProgressSnapshot {
    pub fn new(offset: u64, total_size: Option<u64>) -> Self {
        Self { offset, total_size }
    }

    /// 百分比 0.0 ~ 100.0；总大小未知时为 0，空文件为 100。
    pub fn percent(&self) -> f64 {
        match self.total_size {
            Some(0) => 100.0,
            Some(total) => (self.offset.min(total) as f64 / total as f64) * 100.0,
            None => 0.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_size.is_some_and(|total| self.offset >= total)
    }
}
