use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use super::delivery_mode::DeliveryMode;
use super::reactive_state::SessionReactiveState;
use super::session_controller_builder::SessionControllerBuilder;
use super::session_status::SessionStatus;
use crate::internal::range_store::structs::SessionKey;
use crate::internal::transfer::structs::{
    Artifact, ChunkFetchEngine, ProgressSnapshot, TerminalState, TransferError,
};
use crate::states::unlock_reactive::UnlockReactivePropertyError;

/// 单个下载会话的控制器：开始、暂停、重置，外加进度 / 状态 / 错误的监听。
///
/// 所有状态切换都在同一把异步锁内完成，同一时刻最多只有一轮下载在跑。
/// `Clone` 得到的是同一个会话的另一个句柄。全部句柄释放后，进行中的下载随之取消。
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<ControllerInner>,
    _lifetime: Arc<DropGuard>,
}

struct ControllerInner {
    engine: ChunkFetchEngine,
    /// 每一轮下载的令牌都派生自它
    lifetime: CancellationToken,
    delivery: DeliveryMode,
    reactive_state: SessionReactiveState,
    run_slot: Mutex<RunSlot>,
}

/// 当前这一轮下载的取消令牌与任务句柄
#[derive(Default)]
struct RunSlot {
    token: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

/// 构建
impl SessionController {
    pub fn builder(session: SessionKey) -> SessionControllerBuilder {
        SessionControllerBuilder::new(session)
    }

    /// 下载 `<base_url>/<file_id>`，文件名即 `file_id`
    pub fn for_file(
        base_url: &str,
        file_id: &str,
    ) -> Result<SessionControllerBuilder, TransferError> {
        Ok(Self::builder(SessionKey::for_file(base_url, file_id)?))
    }

    /// 从存储恢复会话：有进度时为 `Paused`，有失败标记时为 `Failed`。
    pub(crate) async fn restore(
        engine: ChunkFetchEngine,
        delivery: DeliveryMode,
    ) -> Result<Self, TransferError> {
        let records = engine.records();
        let failure = records.load_failure().await?;
        let progress = ProgressSnapshot::new(
            records.load_offset().await?,
            records.load_total_size().await?,
        );

        let status = if failure.is_some() {
            SessionStatus::Failed
        } else if progress.offset > 0 || progress.total_size.is_some() {
            SessionStatus::Paused
        } else {
            SessionStatus::Idle
        };
        debug!(
            "恢复会话 {}: {:?}，进度 {}/{:?}",
            engine.session().file_name,
            status,
            progress.offset,
            progress.total_size
        );

        let reactive_state = SessionReactiveState::new(status, progress);
        reactive_state.last_error.update(failure);
        let engine = engine.with_progress(reactive_state.progress.clone());
        let lifetime = CancellationToken::new();

        Ok(Self {
            _lifetime: Arc::new(lifetime.clone().drop_guard()),
            inner: Arc::new(ControllerInner {
                engine,
                lifetime,
                delivery,
                reactive_state,
                run_slot: Mutex::new(RunSlot::default()),
            }),
        })
    }
}

/// 外部接口：状态切换
impl SessionController {
    /// 开始或继续下载。只有 `Idle` / `Paused` 时生效，返回是否真的启动了一轮下载。
    pub async fn start(&self) -> bool {
        let mut slot = self.inner.run_slot.lock().await;

        let status = self.status();
        if !status.can_start() {
            debug!("{:?} 状态下忽略 start", status);
            return false;
        }
        // 上一轮可能已经发布了终态但任务还没退出
        self.inner.settle(&mut slot).await;

        let state = &self.inner.reactive_state;
        state.last_error.update(None);
        state.status.update(SessionStatus::Active);

        let token = self.inner.lifetime.child_token();
        let run_token = token.clone();
        let inner = Arc::clone(&self.inner);
        slot.handle = Some(tokio::spawn(async move {
            inner.run_once(run_token).await;
        }));
        slot.token = Some(token);
        true
    }

    /// 暂停：取消正在进行的请求并等这一轮退出。只有 `Active` 时生效。
    ///
    /// 最后一块恰好已经落盘时，这一轮会以 `Completed` 结束。
    pub async fn pause(&self) -> bool {
        let mut slot = self.inner.run_slot.lock().await;

        if self.status() != SessionStatus::Active {
            debug!("{:?} 状态下忽略 pause", self.status());
            return false;
        }
        if let Some(token) = slot.token.take() {
            token.cancel();
        }
        self.inner.settle(&mut slot).await;
        true
    }

    /// 重置：停止下载，清空全部持久化记录，回到 `Idle`。
    ///
    /// 清理存储失败时仍回到 `Idle`，错误写入 `last_error` 并返回。
    pub async fn reset(&self) -> Result<(), TransferError> {
        let mut slot = self.inner.run_slot.lock().await;

        if let Some(token) = slot.token.take() {
            token.cancel();
        }
        self.inner.settle(&mut slot).await;

        let state = &self.inner.reactive_state;
        let cleared = self.inner.engine.records().clear().await;
        state.progress.update(ProgressSnapshot::default());
        state.artifact.update(None);

        let result = match cleared {
            Ok(()) => {
                state.last_error.update(None);
                Ok(())
            }
            Err(e) => {
                let e = TransferError::from(e);
                warn!("重置会话时清理存储失败: {}", e);
                state.last_error.update(Some(e.to_string()));
                Err(e)
            }
        };
        state.status.update(SessionStatus::Idle);
        debug!("会话 {} 已重置", self.session().file_name);
        result
    }
}

/// 外部接口：读取与监听
impl SessionController {
    pub fn session(&self) -> &SessionKey {
        self.inner.engine.session()
    }

    pub fn reactive_state(&self) -> &SessionReactiveState {
        &self.inner.reactive_state
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.reactive_state.status.get_current()
    }

    pub fn progress(&self) -> ProgressSnapshot {
        self.inner.reactive_state.progress.get_current()
    }

    /// 0.0 ~ 100.0
    pub fn progress_percent(&self) -> f64 {
        self.inner.reactive_state.progress.map(|p| p.percent())
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.reactive_state.last_error.get_current()
    }

    pub fn artifact(&self) -> Option<Artifact> {
        self.inner.reactive_state.artifact.get_current()
    }

    /// 挂起直到状态满足条件
    pub async fn wait_for_status<F>(
        &self,
        predicate: F,
    ) -> Result<SessionStatus, UnlockReactivePropertyError>
    where
        F: FnMut(&SessionStatus) -> bool,
    {
        self.inner.reactive_state.status.wait_until(predicate).await
    }

    /// 挂起直到当前这一轮下载结束（完成、暂停或失败）
    pub async fn wait_until_settled(&self) -> Result<SessionStatus, UnlockReactivePropertyError> {
        self.wait_for_status(|status| status.is_settled()).await
    }

    /// 订阅会话状态变化
    pub fn subscribe_status<F>(&self, return_current_value: bool, callback: F)
    where
        F: Fn(&SessionStatus) + Send + 'static,
    {
        let mut watcher = self.inner.reactive_state.status.watch();

        tokio::spawn(async move {
            if return_current_value {
                callback(&watcher.borrow());
            }

            while let Ok(status) = watcher.changed().await {
                callback(&status);
            }
        });
    }

    /// 订阅下载进度变化
    pub fn subscribe_progress<F>(&self, return_current_value: bool, callback: F)
    where
        F: Fn(ProgressSnapshot) + Send + 'static,
    {
        let mut watcher = self.inner.reactive_state.progress.watch();

        tokio::spawn(async move {
            if return_current_value {
                callback(watcher.borrow());
            }

            while let Ok(progress) = watcher.changed().await {
                callback(progress);
            }
        });
    }
}

/// 下载逻辑：在后台任务里跑一轮引擎，并把结局发布到响应式状态上
impl ControllerInner {
    async fn run_once(&self, token: CancellationToken) {
        let state = &self.reactive_state;

        match self.engine.run(&token).await {
            TerminalState::Completed(artifact) => {
                if let DeliveryMode::SaveFile(dir) = &self.delivery {
                    match artifact.save_to(dir).await {
                        Ok(path) => info!("已保存到 {}", path.display()),
                        Err(e) => {
                            let e = TransferError::SaveFile(e);
                            warn!("{}", e);
                            state.last_error.update(Some(e.to_string()));
                        }
                    }
                }
                state.artifact.update(Some(artifact));
                state.status.update(SessionStatus::Completed);
            }
            TerminalState::Cancelled { .. } => {
                state.status.update(SessionStatus::Paused);
            }
            TerminalState::Paused(e) => {
                state.last_error.update(Some(e.to_string()));
                state.status.update(SessionStatus::Paused);
            }
            TerminalState::Failed(e) => {
                state.last_error.update(Some(e.to_string()));
                state.status.update(SessionStatus::Failed);
            }
        }
    }

    /// 等上一轮任务退出。任务异常退出时把状态从 `Active` 拉回 `Paused`。
    async fn settle(&self, slot: &mut RunSlot) {
        slot.token = None;
        let Some(handle) = slot.handle.take() else {
            return;
        };

        if let Err(e) = handle.await {
            warn!("下载任务异常退出: {}", e);
            let state = &self.reactive_state;
            if state.status.get_current() == SessionStatus::Active {
                state.last_error.update(Some(format!("下载任务异常退出: {}", e)));
                state.status.update(SessionStatus::Paused);
            }
        }
    }
}
