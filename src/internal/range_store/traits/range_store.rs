use async_trait::async_trait;

use crate::internal::range_store::structs::StoreError;

/// 单个下载会话的持久化键值存储。
///
/// 实现方保证：
/// - `put` 返回 `Ok` 时数据已落盘，进程随后崩溃也不会丢失；
/// - 单次 `put` / `remove` 要么完整生效，要么不生效；
/// - `clear` 只清空本会话的命名空间。
#[async_trait]
pub trait RangeStore: Send + Sync {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    async fn remove(&self, key: &[u8]) -> Result<(), StoreError>;

    /// 本会话下的全部键，顺序不作保证。
    async fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}
