/// 会话状态（由控制器内部维护，外部只读监听）
///
/// `Idle → Active → {Paused, Completed, Failed}`，`Paused` 可再次启动，
/// `Completed` / `Failed` 只能通过重置回到 `Idle`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    Paused,
    Completed,
    Failed,
}

impl SessionStatus {
    /// 能否（再次）开始下载
    pub fn can_start(&self) -> bool {
        matches!(self, SessionStatus::Idle | SessionStatus::Paused)
    }

    /// 没有正在进行的下载
    pub fn is_settled(&self) -> bool {
        !matches!(self, SessionStatus::Active)
    }
}
