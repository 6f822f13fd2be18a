//! 响应式属性测试：基础读写、watch 监听、`wait_until` 条件等待、销毁后监听结束。

use std::time::Duration;

use crate::states::unlock_reactive::{UnlockReactiveProperty, UnlockReactivePropertyError};

#[tokio::test]
async fn basic_update_and_read() {
    let prop = UnlockReactiveProperty::new(0u64);
    prop.update(42);
    assert_eq!(prop.get_current(), 42);

    prop.update_field(|v| *v += 8);
    assert_eq!(prop.get_current(), 50);

    assert_eq!(prop.map(|v| v * 2), 100);
}

#[tokio::test]
async fn update_without_watchers_keeps_latest_value() {
    let prop = UnlockReactiveProperty::new(String::from("idle"));
    prop.update("active".to_string()).update("paused".to_string());
    assert_eq!(prop.get_current(), "paused");

    let watcher = prop.watch();
    assert_eq!(watcher.borrow(), "paused");
}

#[tokio::test]
async fn clones_share_the_same_value() {
    let prop = UnlockReactiveProperty::new(1i32);
    let other = prop.clone();
    other.update(7);
    assert_eq!(prop.get_current(), 7);
}

#[tokio::test]
async fn watch_receives_updates() {
    let prop = UnlockReactiveProperty::new(0i32);
    let mut watcher = prop.watch();

    prop.update(1);
    assert_eq!(watcher.changed().await.unwrap(), 1);

    prop.update(2);
    assert_eq!(watcher.changed().await.unwrap(), 2);
}

#[tokio::test]
async fn wait_until_already_satisfied() {
    let prop = UnlockReactiveProperty::new(100i32);
    let value = prop.wait_until(|v| *v == 100).await.unwrap();
    assert_eq!(value, 100);
}

#[tokio::test]
async fn wait_until_async_satisfied() {
    let prop = UnlockReactiveProperty::new(0i32);
    let p = prop.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        p.update(1);
        tokio::time::sleep(Duration::from_millis(20)).await;
        p.update(42);
    });

    let value = prop.wait_until(|v| *v == 42).await.unwrap();
    assert_eq!(value, 42);
}

#[tokio::test]
async fn wait_until_blocks_when_unsatisfied() {
    let prop = UnlockReactiveProperty::new(0i32);

    let result = tokio::time::timeout(
        Duration::from_millis(100),
        prop.wait_until(|v| *v == 9999),
    )
    .await;
    assert!(result.is_err(), "条件不满足时不应返回");
}

#[tokio::test]
async fn watcher_ends_when_property_dropped() {
    let prop = UnlockReactiveProperty::new(0u8);
    let mut watcher = prop.watch();
    drop(prop);

    let result = watcher.changed().await;
    assert!(matches!(result, Err(UnlockReactivePropertyError::Destroyed)));
}
