//! 会话记录：在 [`RangeStore`] 的原始字节键值之上，提供偏移、总大小、失败标记和分片的类型化读写。

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::store_error::StoreError;
use crate::internal::range_store::traits::RangeStore;

const OFFSET_KEY: &[u8] = b"meta:offset";
const TOTAL_SIZE_KEY: &[u8] = b"meta:total_size";
const FAILURE_KEY: &[u8] = b"meta:failure";
const CHUNK_PREFIX: &str = "chunk:";

pub struct RecordKeys;

impl RecordKeys {
    /// 分片键：偏移补零到 20 位，字典序即偏移序。
    pub fn chunk_key(offset: u64) -> Vec<u8> {
        format!("{}{:020}", CHUNK_PREFIX, offset).into_bytes()
    }

    /// 从分片键解析偏移；不是分片键时返回 `None`。
    pub fn chunk_offset(key: &[u8]) -> Option<u64> {
        std::str::from_utf8(key)
            .ok()?
            .strip_prefix(CHUNK_PREFIX)?
            .parse()
            .ok()
    }
}

/// 单个会话的全部持久化记录。
#[derive(Clone)]
pub struct SessionRecords {
    store: Arc<dyn RangeStore>,
}

impl SessionRecords {
    pub fn new(store: Arc<dyn RangeStore>) -> Self {
        Self { store }
    }

    /// 下一个待下载的字节位置，未记录时为 0。
    pub async fn load_offset(&self) -> Result<u64, StoreError> {
        Ok(self.load(OFFSET_KEY).await?.unwrap_or(0))
    }

    pub async fn save_offset(&self, offset: u64) -> Result<(), StoreError> {
        self.save(OFFSET_KEY, &offset).await
    }

    pub async fn load_total_size(&self) -> Result<Option<u64>, StoreError> {
        self.load(TOTAL_SIZE_KEY).await
    }

    pub async fn save_total_size(&self, total_size: u64) -> Result<(), StoreError> {
        self.save(TOTAL_SIZE_KEY, &total_size).await
    }

    /// 致命错误标记：存在时会话拒绝继续请求，直到被重置。
    pub async fn load_failure(&self) -> Result<Option<String>, StoreError> {
        self.load(FAILURE_KEY).await
    }

    pub async fn save_failure(&self, reason: &str) -> Result<(), StoreError> {
        self.save(FAILURE_KEY, &reason).await
    }

    pub async fn load_chunk(&self, offset: u64) -> Result<Option<Vec<u8>>, StoreError> {
        self.store.get(&RecordKeys::chunk_key(offset)).await
    }

    /// 整块写入分片，同一偏移只会被整体替换，不会出现半块数据。
    pub async fn save_chunk(&self, offset: u64, bytes: &[u8]) -> Result<(), StoreError> {
        self.store.put(&RecordKeys::chunk_key(offset), bytes).await
    }

    /// 已持久化的分片偏移，升序。
    pub async fn chunk_offsets(&self) -> Result<Vec<u64>, StoreError> {
        let mut offsets: Vec<u64> = self
            .store
            .keys()
            .await?
            .iter()
            .filter_map(|key| RecordKeys::chunk_offset(key))
            .collect();
        offsets.sort_unstable();
        Ok(offsets)
    }

    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.store.keys().await?.is_empty())
    }

    /// 删除会话的全部记录。
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.clear().await
    }

    async fn load<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        match self.store.get(key).await? {
            Some(bytes) => Ok(Some(postcard::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save<T: Serialize + ?Sized>(&self, key: &[u8], value: &T) -> Result<(), StoreError> {
        let bytes = postcard::to_allocvec(value)?;
        self.store.put(key, &bytes).await
    }
}
