use async_trait::async_trait;

use crate::internal::range_store::structs::{MemoryRangeStore, StoreError};
use crate::internal::range_store::traits::RangeStore;

#[async_trait]
impl RangeStore for MemoryRangeStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.entries().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &[u8]) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        Ok(self.entries().keys().cloned().collect())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries().clear();
        Ok(())
    }
}
