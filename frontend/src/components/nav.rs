//! 顶部导航栏
//!
//! 展示会话信息（名字 + 余额）、视图切换按钮与登出入口。
//! 装载时机会性地后台刷新一次会话余额（展示即刷新，尽力而为）。

use crate::actions::{AppActions, UiShell};
use crate::api::use_api;
use crate::components::icons::{LogOut, Store};
use crate::notify::use_notify;
use crate::session::use_session;
use crate::web::route::AppView;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 可从导航栏直达的视图
const NAV_VIEWS: [(AppView, &str); 3] = [
    (AppView::Shop, "Shop"),
    (AppView::Orders, "My Orders"),
    (AppView::Admin, "Admin"),
];

#[component]
pub fn NavBar() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();
    let shell = UiShell::new(use_notify(), router);

    // 装载时后台刷新会话余额；无会话时是空操作。
    // 不读取任何响应式状态，因此只执行一次，不会形成刷新环。
    {
        let api = api.clone();
        let store = session.store.clone();
        Effect::new(move |_| {
            let api = api.clone();
            let store = store.clone();
            spawn_local(async move {
                store.refresh(api.client()).await;
            });
        });
    }

    let on_logout = {
        let api = api.clone();
        let store = session.store.clone();
        move |_| {
            let actions = AppActions::new(api.client(), &store, &shell);
            actions.logout();
        }
    };

    let user = session.user;

    view! {
        <div class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1 gap-2">
                <Store attr:class="h-6 w-6 text-primary" />
                <span class="text-xl font-bold">"OpenStall"</span>
                {NAV_VIEWS
                    .into_iter()
                    .map(|(view, label)| {
                        let active = move || router.current_view().get() == view;
                        view! {
                            <button
                                class="btn btn-ghost btn-sm"
                                class:btn-active=active
                                on:click=move |_| router.navigate(view)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="flex-none gap-3">
                <span class="font-semibold">
                    {move || user.get().map(|u| u.name).unwrap_or_else(|| "Guest".to_string())}
                </span>
                <span class="badge badge-neutral">
                    {move || {
                        user.get()
                            .map(|u| format!("Balance: ${}", u.wallet))
                            .unwrap_or_default()
                    }}
                </span>
                <Show when=move || user.get().is_some()>
                    <button on:click=on_logout.clone() class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </Show>
            </div>
        </div>
    }
}
