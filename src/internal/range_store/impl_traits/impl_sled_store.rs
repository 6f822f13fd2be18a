use async_trait::async_trait;
use sled::transaction::{ConflictableTransactionError, TransactionError};

use crate::internal::range_store::structs::{SledRangeStore, StoreError};
use crate::internal::range_store::traits::RangeStore;

impl SledRangeStore {
    /// 写入与 `flush` 会阻塞在磁盘同步上，放到阻塞线程池里执行
    async fn blocking<F, T>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&sled::Tree) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let tree = self.tree.clone();
        tokio::task::spawn_blocking(move || op(&tree)).await?
    }
}

#[async_trait]
impl RangeStore for SledRangeStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.tree.get(key)?.map(|value| value.to_vec()))
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let (key, value) = (key.to_vec(), value.to_vec());
        self.blocking(move |tree| {
            tree.insert(key, value)?;
            tree.flush()?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &[u8]) -> Result<(), StoreError> {
        let key = key.to_vec();
        self.blocking(move |tree| {
            tree.remove(key)?;
            tree.flush()?;
            Ok(())
        })
        .await
    }

    async fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        let mut keys = Vec::new();
        for key in self.tree.iter().keys() {
            keys.push(key?.to_vec());
        }
        Ok(keys)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.blocking(|tree| {
            let keys = tree.iter().keys().collect::<Result<Vec<_>, _>>()?;

            // 整个会话要么全部删除，要么保持原样
            tree.transaction(|tx| {
                for key in &keys {
                    tx.remove(key.clone())?;
                }
                Ok::<(), ConflictableTransactionError<()>>(())
            })
            .map_err(|e| match e {
                TransactionError::Abort(()) => StoreError::TransactionAborted,
                TransactionError::Storage(e) => StoreError::Database(e),
            })?;

            tree.flush()?;
            Ok(())
        })
        .await
    }
}
