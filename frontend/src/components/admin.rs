//! 管理视图
//!
//! 商品上架、系统状态展示与后端压测触发。
//! 上架成功后清空表单；不向任何本地商品缓存做乐观插入，
//! 商品列表以再次进入商店视图时的拉取为准。

use crate::actions::{AppActions, SystemHealth, UiShell, check_status};
use crate::api::use_api;
use crate::components::icons::{Activity, Plus, RefreshCw};
use crate::notify::{Severity, use_notify};
use crate::session::use_session;
use crate::use_status;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use openstall_shared::protocol::CreateProductRequest;

/// 解析商品表单；字段齐全且数字合法才产出请求
fn parse_product_form(name: &str, price: &str, stock: &str) -> Option<CreateProductRequest> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let price: f64 = price.trim().parse().ok()?;
    let stock: u32 = stock.trim().parse().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    Some(CreateProductRequest {
        name: name.to_string(),
        price,
        stock,
    })
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let notify = use_notify();
    let shell = UiShell::new(notify, use_router());
    let status = use_status();

    // 商品表单
    let (prod_name, set_prod_name) = signal(String::new());
    let (prod_price, set_prod_price) = signal(String::new());
    let (prod_stock, set_prod_stock) = signal(String::new());
    let (creating, set_creating) = signal(false);

    // 压测表单
    let (stress_sec, set_stress_sec) = signal("10".to_string());
    let (stress_int, set_stress_int) = signal("1".to_string());

    let (checking, set_checking) = signal(false);

    // 进入管理页时重新探测一次
    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                status.0.set(check_status(api.client()).await);
            });
        });
    }

    let on_create = {
        let api = api.clone();
        let store = session.store.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(req) = parse_product_form(&prod_name.get(), &prod_price.get(), &prod_stock.get())
            else {
                notify.push("Invalid product details", Severity::Error);
                return;
            };

            set_creating.set(true);
            let api = api.clone();
            let store = store.clone();
            spawn_local(async move {
                let actions = AppActions::new(api.client(), &store, &shell);
                if actions.create_product(req).await {
                    // 成功后清空表单
                    set_prod_name.set(String::new());
                    set_prod_price.set(String::new());
                    set_prod_stock.set(String::new());
                }
                set_creating.set(false);
            });
        }
    };

    let on_recheck = {
        let api = api.clone();
        move |_| {
            set_checking.set(true);
            let api = api.clone();
            spawn_local(async move {
                status.0.set(check_status(api.client()).await);
                set_checking.set(false);
            });
        }
    };

    let on_stress = {
        let api = api.clone();
        let store = session.store.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let seconds: u32 = stress_sec.get().trim().parse().unwrap_or(10);
            let intensity: u32 = stress_int.get().trim().parse().unwrap_or(1);

            let api = api.clone();
            let store = store.clone();
            spawn_local(async move {
                let actions = AppActions::new(api.client(), &store, &shell);
                actions.run_stress(seconds, intensity).await;
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Admin"</h2>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                // 商品上架
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Add Product"</h3>
                        <form class="space-y-4" on:submit=on_create>
                            <div class="form-control">
                                <label class="label" for="prod-name">
                                    <span class="label-text">"Name"</span>
                                </label>
                                <input
                                    id="prod-name"
                                    type="text"
                                    placeholder="Laptop"
                                    on:input=move |ev| set_prod_name.set(event_target_value(&ev))
                                    prop:value=prod_name
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label class="label" for="prod-price">
                                        <span class="label-text">"Price"</span>
                                    </label>
                                    <input
                                        id="prod-price"
                                        type="number"
                                        min="0"
                                        step="0.01"
                                        placeholder="999.99"
                                        on:input=move |ev| set_prod_price.set(event_target_value(&ev))
                                        prop:value=prod_price
                                        class="input input-bordered w-full"
                                        required
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="prod-stock">
                                        <span class="label-text">"Stock"</span>
                                    </label>
                                    <input
                                        id="prod-stock"
                                        type="number"
                                        min="0"
                                        placeholder="10"
                                        on:input=move |ev| set_prod_stock.set(event_target_value(&ev))
                                        prop:value=prod_stock
                                        class="input input-bordered w-full"
                                        required
                                    />
                                </div>
                            </div>
                            <button type="submit" disabled=move || creating.get() class="btn btn-primary gap-2">
                                {move || if creating.get() {
                                    view! { <span class="loading loading-spinner"></span> "Adding..." }.into_any()
                                } else {
                                    view! { <Plus attr:class="h-4 w-4" /> "Add Product" }.into_any()
                                }}
                            </button>
                        </form>
                    </div>
                </div>

                <div class="space-y-6">
                    // 系统状态
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <div class="flex items-center justify-between">
                                <h3 class="card-title gap-2">
                                    <Activity attr:class="h-5 w-5" /> "System Status"
                                </h3>
                                <button
                                    on:click=on_recheck
                                    disabled=move || checking.get()
                                    class="btn btn-ghost btn-circle btn-sm"
                                >
                                    <RefreshCw attr:class=move || {
                                        if checking.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                                    } />
                                </button>
                            </div>
                            <div class="text-lg">
                                {move || match status.0.get() {
                                    SystemHealth::Unknown => view! {
                                        <span class="text-base-content/50">"Checking..."</span>
                                    }
                                    .into_any(),
                                    SystemHealth::Online(sub) => view! {
                                        <span class="text-success">"● Online"</span>
                                        <span class="text-base-content/70">{format!(" (Gateway: {sub})")}</span>
                                    }
                                    .into_any(),
                                    SystemHealth::Offline => view! {
                                        <span class="text-error">"● Offline"</span>
                                    }
                                    .into_any(),
                                }}
                            </div>
                        </div>
                    </div>

                    // 压测触发
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"Load Generator"</h3>
                            <p class="text-sm text-base-content/60">
                                "Pin backend CPU cores for a fixed duration."
                            </p>
                            <form class="flex items-end gap-4" on:submit=on_stress>
                                <div class="form-control">
                                    <label class="label" for="stress-sec">
                                        <span class="label-text">"Seconds"</span>
                                    </label>
                                    <input
                                        id="stress-sec"
                                        type="number"
                                        min="1"
                                        on:input=move |ev| set_stress_sec.set(event_target_value(&ev))
                                        prop:value=stress_sec
                                        class="input input-bordered w-24"
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label" for="stress-int">
                                        <span class="label-text">"Intensity"</span>
                                    </label>
                                    <input
                                        id="stress-int"
                                        type="number"
                                        min="1"
                                        on:input=move |ev| set_stress_int.set(event_target_value(&ev))
                                        prop:value=stress_int
                                        class="input input-bordered w-24"
                                    />
                                </div>
                                <button type="submit" class="btn btn-warning">"Trigger"</button>
                            </form>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_form() {
        let req = parse_product_form("Laptop", "999.99", "10").unwrap();
        assert_eq!(req.name, "Laptop");
        assert_eq!(req.price, 999.99);
        assert_eq!(req.stock, 10);
    }

    #[test]
    fn trims_whitespace() {
        let req = parse_product_form("  Laptop  ", " 5 ", " 3 ").unwrap();
        assert_eq!(req.name, "Laptop");
        assert_eq!(req.price, 5.0);
        assert_eq!(req.stock, 3);
    }

    #[test]
    fn rejects_incomplete_or_invalid_input() {
        assert!(parse_product_form("", "10", "1").is_none());
        assert!(parse_product_form("Laptop", "abc", "1").is_none());
        assert!(parse_product_form("Laptop", "10", "-1").is_none());
        assert!(parse_product_form("Laptop", "-1", "1").is_none());
        assert!(parse_product_form("Laptop", "10", "1.5").is_none());
    }
}
