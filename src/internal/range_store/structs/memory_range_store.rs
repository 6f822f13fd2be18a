use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// 纯内存存储，不跨进程持久化。
///
/// `Clone` 共享同一份数据，可用来模拟“进程重启后重新打开同一个存储”。
#[derive(Debug, Clone, Default)]
pub struct MemoryRangeStore {
    entries: Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryRangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub(crate) fn entries(&self) -> MutexGuard<'_, HashMap<Vec<u8>, Vec<u8>>> {
        // 临界区内没有会 panic 的操作，中毒时数据仍然完整
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
