//! # ReactiveProperty：响应式属性内核
//!
//! 会话状态、进度、错误等可观察值的公共基础设施，基于 [`tokio::sync::watch`]。
//! 写入端永远持有最新值：没有任何监听者时 `update` 也不会丢值。
//!
//! 本模块**不对外导出**，对外统一通过 [`UnlockReactiveProperty`](super::unlock_reactive::UnlockReactiveProperty)。

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

// ──────────────────────────── Error ────────────────────────────

/// 响应式属性统一错误类型
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 所有属性句柄都已释放，监听器不会再收到新值
    #[error("属性已被销毁")]
    Destroyed,

    /// watch 通道接收失败
    #[error("接收失败: {0}")]
    RecvError(#[from] RecvError),
}

// ──────────────────────────── ReactiveProperty ────────────────────────────

/// 响应式属性内核：提供 new / update / update_field / get_current / watch / wait_until。
///
/// `Clone` 得到的是同一个属性的另一个句柄。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    /// 创建一个新的响应式属性。
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 替换属性的值，所有监听者都会收到通知。
    pub fn update(&self, new_value: T) -> &Self {
        self.sender.send_replace(new_value);
        self
    }

    /// 使用闭包原地修改属性的部分字段。
    pub fn update_field<F>(&self, updater: F) -> &Self
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
        self
    }

    /// 获取当前值的快照（会 clone）。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 对当前值应用转换函数，不 clone 整个值。
    pub fn map<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.sender.borrow())
    }

    /// 创建一个监听器，用于异步监听属性值的变化。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.sender.subscribe(),
        }
    }

    /// 挂起直到当前值满足 `predicate`，返回满足条件的那个值。
    ///
    /// 当前值已满足时立即返回；先订阅再检查，不会错过订阅前后的更新。
    pub async fn wait_until<F>(
        &self,
        predicate: F,
    ) -> Result<T, ReactivePropertyError>
    where
        F: FnMut(&T) -> bool,
    {
        let mut receiver = self.sender.subscribe();
        let value = receiver.wait_for(predicate).await?.clone();
        Ok(value)
    }
}

// ──────────────────────────── PropertyWatcher ────────────────────────────

/// 属性监听器，用于异步接收属性值的变化。
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 异步等待属性值的变化，返回新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        if self.receiver.changed().await.is_err() {
            return Err(ReactivePropertyError::Destroyed);
        }
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 同步获取当前值的克隆。
    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
