use std::path::PathBuf;
use std::sync::Arc;

use super::delivery_mode::DeliveryMode;
use super::session_controller::SessionController;
use crate::internal::range_store::structs::{SessionKey, SledRangeStore};
use crate::internal::range_store::traits::RangeStore;
use crate::internal::transfer::impl_traits::ReqwestRangeClient;
use crate::internal::transfer::structs::{ChunkFetchEngine, EngineConfig, TransferError};
use crate::internal::transfer::traits::RangeClient;

/// 会话控制器的构建器。
///
/// 未指定时：客户端用 [`ReqwestRangeClient`]，存储用本地数据目录下的 [`SledRangeStore`]，
/// 交付方式为 [`DeliveryMode::OutputBytes`]。
pub struct SessionControllerBuilder {
    session: SessionKey,
    client: Option<Arc<dyn RangeClient>>,
    store: Option<Arc<dyn RangeStore>>,
    config: EngineConfig,
    delivery: DeliveryMode,
}

impl SessionControllerBuilder {
    pub(crate) fn new(session: SessionKey) -> Self {
        Self {
            session,
            client: None,
            store: None,
            config: EngineConfig::default(),
            delivery: DeliveryMode::default(),
        }
    }

    pub fn client(mut self, client: Arc<dyn RangeClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn store(mut self, store: Arc<dyn RangeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// 设置分片大小（字节）；已有进度的会话必须沿用原来的值
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.config = self.config.chunk_size(chunk_size);
        self
    }

    /// 完成后写入该目录
    pub fn save_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.delivery = DeliveryMode::SaveFile(dir.into());
        self
    }

    /// 完成后只输出到内存
    pub fn output_bytes(mut self) -> Self {
        self.delivery = DeliveryMode::OutputBytes;
        self
    }

    /// 打开存储并读取已有进度，得到可用的控制器。
    pub async fn open(self) -> Result<SessionController, TransferError> {
        let store: Arc<dyn RangeStore> = match self.store {
            Some(store) => store,
            None => Arc::new(SledRangeStore::open_default(&self.session)?),
        };
        let client: Arc<dyn RangeClient> = match self.client {
            Some(client) => client,
            None => Arc::new(ReqwestRangeClient::new()),
        };

        let engine = ChunkFetchEngine::new(client, store, self.session, self.config);
        SessionController::restore(engine, self.delivery).await
    }
}
