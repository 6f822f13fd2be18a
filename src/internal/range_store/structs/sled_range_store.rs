use std::path::Path;

use super::session_key::SessionKey;
use super::store_error::StoreError;

/// 默认数据库目录名，位于系统本地数据目录下
pub const DEFAULT_STORE_DIR: &str = "resumable_fetch";

/// 基于 sled 的持久化存储：同一个数据库里每个会话独占一棵 tree。
#[derive(Debug, Clone)]
pub struct SledRangeStore {
    pub(crate) tree: sled::Tree,
}

impl SledRangeStore {
    /// 打开（或创建）`path` 处的数据库，并定位到会话对应的 tree。
    pub fn open(
        path: impl AsRef<Path>,
        session: &SessionKey,
    ) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Self::with_db(&db, session)
    }

    /// 打开 `<本地数据目录>/resumable_fetch/` 下的默认数据库。
    pub fn open_default(session: &SessionKey) -> Result<Self, StoreError> {
        let dir = dirs::data_local_dir()
            .ok_or(StoreError::NoDataDir)?
            .join(DEFAULT_STORE_DIR);
        Self::open(dir, session)
    }

    /// 进程退出即删除的临时数据库，测试用。
    pub fn temporary(session: &SessionKey) -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::with_db(&db, session)
    }

    /// 多个会话共用一个已打开的数据库。
    pub fn with_db(
        db: &sled::Db,
        session: &SessionKey,
    ) -> Result<Self, StoreError> {
        let tree = db.open_tree(session.namespace())?;
        Ok(Self { tree })
    }
}
