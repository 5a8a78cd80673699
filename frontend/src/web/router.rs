//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 导航流程统一为"请求 -> 守卫 -> 写入 History -> 更新信号"，
//! 守卫逻辑本身由 `route::guard` 提供（纯函数，便于测试）。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{self, AppView};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前视图（只读信号）
    current_view: ReadSignal<AppView>,
    /// 设置当前视图（写入信号）
    set_view: WriteSignal<AppView>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `is_authenticated` - 认证状态信号，由外部注入实现解耦
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 初始视图从 URL 解析；启动时的未认证强制跳转
        // 由 setup_auth_redirect 的首次执行完成
        let path = current_path();
        let initial_view = AppView::from_path(&path);
        let (current_view, set_view) = signal(initial_view);

        Self {
            current_view,
            set_view,
            is_authenticated,
        }
    }

    /// 获取当前视图信号
    pub fn current_view(&self) -> ReadSignal<AppView> {
        self.current_view
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, target: AppView) {
        self.apply(target, true);
    }

    /// 导航到指定视图
    ///
    /// # Arguments
    /// * `target` - 目标视图
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn apply(&self, target: AppView, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let resolved = route::guard(target, is_auth);

        if resolved != target {
            web_sys::console::log_1(
                &format!("[Router] {} redirected to {}", target, resolved).into(),
            );
        }

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_view.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_view = self.set_view;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppView::from_path(&current_path());
            let resolved = route::guard(target, is_authenticated.get_untracked());

            // popstate 时也执行守卫逻辑，重定向用 replaceState 以免污染历史
            if resolved != target {
                replace_history_state(resolved.to_path());
            }
            set_view.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 登出后强制回到登录页、登录后离开登录页都由此 Effect 完成；
    /// 首次执行还承担启动时的未认证强制跳转。
    fn setup_auth_redirect(&self) {
        let current_view = self.current_view;
        let set_view = self.set_view;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let view = current_view.get_untracked();
            let resolved = route::guard(view, is_auth);

            if resolved != view {
                push_history_state(resolved.to_path());
                set_view.set(resolved);
                web_sys::console::log_1(
                    &format!("[Router] Auth state changed: redirecting to {}", resolved).into(),
                );
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前视图状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 视图匹配函数：接收当前视图，返回对应组件
    matcher: fn(AppView) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_view().get();
        matcher(current)
    }
}
