//! # UnlockReactiveProperty
//!
//! 会话对外暴露的可观察值容器，基于 [`tokio::sync::watch`]，读写都不加锁。
//!
//! ## 使用示例
//! ```rust,no_run
//! use resumable_fetch::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let percent = UnlockReactiveProperty::new(0.0f64);
//! percent.update(40.0).update(80.0);
//! assert_eq!(percent.get_current(), 80.0);
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

/// 轻量级响应式属性容器。
///
/// 适合高频更新（下载进度）以及需要条件等待的低频状态（会话状态），
/// 条件等待见 [`wait_until`](super::reactive_core::ReactiveProperty::wait_until)。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
