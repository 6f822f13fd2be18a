use crate::internal::session::structs::SessionStatus;
use crate::internal::transfer::structs::{Artifact, ProgressSnapshot};
use crate::states::unlock_reactive::UnlockReactiveProperty;

/// 会话响应式状态
#[derive(Debug, Clone)]
pub struct SessionReactiveState {
    /// 会话状态（只读）：由控制器更新，外部通过 watch 监听
    pub status: UnlockReactiveProperty<SessionStatus>,
    /// 下载进度（只读）：引擎每写完一块就更新
    pub progress: UnlockReactiveProperty<ProgressSnapshot>,
    /// 最近一次错误的描述，暂停不算错误
    pub last_error: UnlockReactiveProperty<Option<String>>,
    /// 完成后的文件，重置时清空
    pub artifact: UnlockReactiveProperty<Option<Artifact>>,
}

impl SessionReactiveState {
    pub(crate) fn new(status: SessionStatus, progress: ProgressSnapshot) -> Self {
        Self {
            status: UnlockReactiveProperty::new(status),
            progress: UnlockReactiveProperty::new(progress),
            last_error: UnlockReactiveProperty::new(None),
            artifact: UnlockReactiveProperty::new(None),
        }
    }
}
