//! OpenStall 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 视图定义（领域模型，含纯函数导航守卫）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话状态管理（代际守卫的后台刷新）
//! - `gateway` / `api`: 网关抽象与 HTTP 客户端
//! - `actions`: 用户动作编排（可注入 Mock 做原生单元测试）
//! - `notify`: 通知 (Toast)
//! - `components`: UI 组件层

mod actions;
mod api;
mod gateway;
mod notify;
mod session;
mod components {
    pub mod admin;
    pub mod auth;
    mod icons;
    pub mod nav;
    pub mod orders;
    pub mod shop;
}

pub use crate::actions::SystemHealth;

use crate::actions::check_status;
use crate::api::ApiContext;
use crate::components::admin::AdminPage;
use crate::components::auth::AuthPage;
use crate::components::nav::NavBar;
use crate::components::orders::OrdersPage;
use crate::components::shop::ShopPage;
use crate::notify::{NotifyContext, ToastStack};
use crate::session::SessionContext;

use leptos::prelude::*;
use leptos::task::spawn_local;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;
}

use web::route::AppView;
use web::router::{Router, RouterOutlet};

/// 系统状态显示槽
///
/// App 装载时探测一次，管理页可手动重探；探针只写这个槽，从不通知。
#[derive(Clone, Copy)]
pub struct StatusContext(pub RwSignal<SystemHealth>);

/// 从 Context 获取系统状态槽
pub fn use_status() -> StatusContext {
    use_context::<StatusContext>().expect("StatusContext should be provided")
}

/// 视图匹配函数
///
/// 根据 AppView 枚举返回对应的视图组件。
fn route_matcher(view: AppView) -> AnyView {
    match view {
        AppView::Auth => view! { <AuthPage /> }.into_any(),
        AppView::Shop => view! { <ShopPage /> }.into_any(),
        AppView::Orders => view! { <OrdersPage /> }.into_any(),
        AppView::Admin => view! { <AdminPage /> }.into_any(),
        AppView::NotFound => view! {
            <div class="flex items-center justify-center py-24">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 全局上下文
    let api = ApiContext::new();
    provide_context(api.clone());

    let session = SessionContext::new();
    provide_context(session.clone());

    let toasts = NotifyContext::new();
    provide_context(toasts);

    let status = StatusContext(RwSignal::new(SystemHealth::Unknown));
    provide_context(status);

    // 2. 启动时探测网关状态（fire-and-forget）
    {
        let api = api.clone();
        spawn_local(async move {
            status.0.set(check_status(api.client()).await);
        });
    }

    // 3. 认证信号注入路由服务（解耦）
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <NavBar />
                <main class="max-w-7xl mx-auto p-4 md:p-8">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
            <ToastStack />
        </Router>
    }
}
