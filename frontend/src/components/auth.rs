//! 登录 / 注册视图
//!
//! 本模型中的登录只是邮箱查找（无密码），注册即开户。
//! 上次成功登录的邮箱保存在 LocalStorage 里用于自动填充。

use crate::actions::{AppActions, UiShell};
use crate::api::use_api;
use crate::notify::use_notify;
use crate::session::use_session;
use crate::web::LocalStorage;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

const STORAGE_EMAIL_KEY: &str = "openstall_last_email";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let shell = UiShell::new(use_notify(), use_router());

    let (mode, set_mode) = signal(AuthMode::Login);
    let (email, set_email) = signal(LocalStorage::get(STORAGE_EMAIL_KEY).unwrap_or_default());
    let (reg_name, set_reg_name) = signal(String::new());
    let (reg_email, set_reg_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_login = {
        let api = api.clone();
        let session = session.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let address = email.get().trim().to_string();
            if address.is_empty() {
                return;
            }

            set_is_submitting.set(true);
            let api = api.clone();
            let store = session.store.clone();
            spawn_local(async move {
                let actions = AppActions::new(api.client(), &store, &shell);
                if actions.login(&address).await {
                    // 只存邮箱方便下次填充，绝不存会话
                    LocalStorage::set(STORAGE_EMAIL_KEY, &address);
                }
                set_is_submitting.set(false);
            });
        }
    };

    let on_register = {
        let api = api.clone();
        let session = session.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let name = reg_name.get().trim().to_string();
            let address = reg_email.get().trim().to_string();
            if name.is_empty() || address.is_empty() {
                return;
            }

            set_is_submitting.set(true);
            let api = api.clone();
            let store = session.store.clone();
            spawn_local(async move {
                let actions = AppActions::new(api.client(), &store, &shell);
                if actions.register(&name, &address).await {
                    LocalStorage::set(STORAGE_EMAIL_KEY, &address);
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="hero py-12">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-2">
                    <h1 class="text-3xl font-bold">"Welcome to OpenStall"</h1>
                    <p class="text-base-content/70 mt-2">"Sign in or create an account to start shopping"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <div class="card-body">
                        <div role="tablist" class="tabs tabs-boxed">
                            <a
                                role="tab"
                                class="tab"
                                class:tab-active=move || mode.get() == AuthMode::Login
                                on:click=move |_| set_mode.set(AuthMode::Login)
                            >
                                "Login"
                            </a>
                            <a
                                role="tab"
                                class="tab"
                                class:tab-active=move || mode.get() == AuthMode::Register
                                on:click=move |_| set_mode.set(AuthMode::Register)
                            >
                                "Register"
                            </a>
                        </div>

                        <Show
                            when=move || mode.get() == AuthMode::Login
                            fallback=move || {
                                view! {
                                    <form class="space-y-4" on:submit=on_register.clone()>
                                        <div class="form-control">
                                            <label class="label" for="reg-name">
                                                <span class="label-text">"Name"</span>
                                            </label>
                                            <input
                                                id="reg-name"
                                                type="text"
                                                placeholder="Alice"
                                                on:input=move |ev| set_reg_name.set(event_target_value(&ev))
                                                prop:value=reg_name
                                                class="input input-bordered w-full"
                                                required
                                            />
                                        </div>
                                        <div class="form-control">
                                            <label class="label" for="reg-email">
                                                <span class="label-text">"Email"</span>
                                            </label>
                                            <input
                                                id="reg-email"
                                                type="email"
                                                placeholder="alice@example.com"
                                                on:input=move |ev| set_reg_email.set(event_target_value(&ev))
                                                prop:value=reg_email
                                                class="input input-bordered w-full"
                                                required
                                            />
                                        </div>
                                        <button class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                            } else {
                                                "Create account".into_any()
                                            }}
                                        </button>
                                    </form>
                                }
                            }
                        >
                            <form class="space-y-4" on:submit=on_login.clone()>
                                <div class="form-control">
                                    <label class="label" for="login-email">
                                        <span class="label-text">"Email"</span>
                                    </label>
                                    <input
                                        id="login-email"
                                        type="email"
                                        placeholder="alice@example.com"
                                        on:input=move |ev| set_email.set(event_target_value(&ev))
                                        prop:value=email
                                        class="input input-bordered w-full"
                                        required
                                    />
                                </div>
                                <button class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                    } else {
                                        "Sign in".into_any()
                                    }}
                                </button>
                            </form>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
