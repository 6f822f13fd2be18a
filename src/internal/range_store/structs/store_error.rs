//! 存储层错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("数据库错误: {0}")]
    Database(#[from] sled::Error),

    #[error("序列化失败: {0}")]
    Serialization(#[from] postcard::Error),

    #[error("事务被中止")]
    TransactionAborted,

    #[error("无法确定本地数据目录")]
    NoDataDir,

    #[error("存储任务异常退出: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}
