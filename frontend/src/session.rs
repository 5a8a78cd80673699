//! 会话状态管理模块
//!
//! 持有最多一条已登录用户记录，与路由 / UI 解耦：
//! - 业务层通过 `SessionStore` 读写（单写者；WASM 运行时是协作式单线程，
//!   锁只为满足视图闭包的 Send 约束，永远不会出现争用）
//! - UI 层通过 `watch` 注册镜像回调，把变更同步进响应式信号
//!
//! 后台刷新采用"代际 (epoch) 守卫"：`replace` / `clear` 都会推进代际，
//! 迟到的刷新结果若代际不匹配则被丢弃，避免登出后会话被刷新结果复活。

use crate::gateway::Gateway;
use leptos::prelude::*;
use openstall_shared::User;
use std::sync::{Arc, RwLock};

type Watcher = Box<dyn Fn(Option<&User>) + Send + Sync>;

#[derive(Default)]
struct Slot {
    user: Option<User>,
    epoch: u64,
}

/// 会话存储（Arc 共享，Clone 即句柄拷贝）
#[derive(Clone, Default)]
pub struct SessionStore {
    slot: Arc<RwLock<Slot>>,
    watcher: Arc<RwLock<Option<Watcher>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前会话（克隆返回）
    pub fn get(&self) -> Option<User> {
        self.slot.read().expect("session lock poisoned").user.clone()
    }

    /// 当前会话的用户 id
    pub fn user_id(&self) -> Option<i64> {
        self.slot
            .read()
            .expect("session lock poisoned")
            .user
            .as_ref()
            .map(|u| u.id)
    }

    /// 当前代际
    pub fn epoch(&self) -> u64 {
        self.slot.read().expect("session lock poisoned").epoch
    }

    /// 整体替换会话（无部分合并），推进代际
    pub fn replace(&self, user: User) {
        {
            let mut slot = self.slot.write().expect("session lock poisoned");
            slot.user = Some(user);
            slot.epoch += 1;
        }
        self.notify_watcher();
    }

    /// 销毁会话，推进代际
    pub fn clear(&self) {
        {
            let mut slot = self.slot.write().expect("session lock poisoned");
            slot.user = None;
            slot.epoch += 1;
        }
        self.notify_watcher();
    }

    /// 注册变更回调（UI 镜像用，单个回调即可）
    pub fn watch(&self, f: impl Fn(Option<&User>) + Send + Sync + 'static) {
        *self.watcher.write().expect("session lock poisoned") = Some(Box::new(f));
    }

    /// 后台刷新：按当前会话 id 重新拉取用户记录
    ///
    /// 成功时仅在代际未变的前提下应用（刷新不推进代际，
    /// 同代际的多个刷新保持 last-write-wins）。
    /// 失败时静默：宁可显示过期余额也不打断用户。
    pub async fn refresh<G: Gateway>(&self, gateway: &G) {
        let (id, issued) = {
            let slot = self.slot.read().expect("session lock poisoned");
            match &slot.user {
                Some(user) => (user.id, slot.epoch),
                None => return,
            }
        };

        if let Ok(user) = gateway.fetch_user(id).await {
            if self.apply_refresh(issued, user) {
                self.notify_watcher();
            }
        }
    }

    /// 代际检查 + 应用，返回是否生效
    fn apply_refresh(&self, issued_epoch: u64, user: User) -> bool {
        let mut slot = self.slot.write().expect("session lock poisoned");
        if slot.epoch == issued_epoch {
            slot.user = Some(user);
            true
        } else {
            false
        }
    }

    fn notify_watcher(&self) {
        let user = self.get();
        if let Some(watcher) = self.watcher.read().expect("session lock poisoned").as_ref() {
            watcher(user.as_ref());
        }
    }
}

// =========================================================
// Leptos 绑定
// =========================================================

/// 注入组件树的会话上下文：纯存储 + 响应式镜像
#[derive(Clone)]
pub struct SessionContext {
    pub store: SessionStore,
    /// 会话的响应式镜像（由 watch 回调维护，组件只读使用）
    pub user: RwSignal<Option<User>>,
}

impl SessionContext {
    pub fn new() -> Self {
        let store = SessionStore::new();
        let user = RwSignal::new(None);
        store.watch(move |u| user.set(u.cloned()));
        Self { store, user }
    }

    /// 认证状态信号（用于注入路由服务）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let user = self.user;
        Signal::derive(move || user.get().is_some())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
