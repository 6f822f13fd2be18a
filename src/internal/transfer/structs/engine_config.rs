/// 默认分片大小：10KB
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * 1024;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 每次请求的字节数，也是分片记录的粒度；同一会话内不可更改
    pub chunk_size: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineConfig {
    /// 设置分片大小，0 按 1 处理
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
