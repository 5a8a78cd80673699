//! 商店视图
//!
//! 进入视图即触发商品列表加载（fire-and-forget），
//! 购买成功后用动作层带回的新列表整体替换本地列表。

use crate::actions::{AppActions, UiShell};
use crate::api::use_api;
use crate::notify::use_notify;
use crate::session::use_session;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use openstall_shared::Product;

/// 库存徽章：样式类 + 文案
fn stock_badge(stock: u32) -> (&'static str, String) {
    if stock > 0 {
        ("badge badge-success badge-outline", format!("In Stock: {stock}"))
    } else {
        ("badge badge-error badge-outline", "Out of Stock".to_string())
    }
}

/// 购买按钮文案
fn buy_label(stock: u32) -> &'static str {
    if stock > 0 { "Buy Now" } else { "Sold Out" }
}

/// 价格文案
fn price_label(price: f64) -> String {
    format!("${price}")
}

#[component]
pub fn ShopPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let shell = UiShell::new(use_notify(), use_router());

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);

    // 进入视图时的初始加载
    {
        let api = api.clone();
        let store = session.store.clone();
        Effect::new(move |_| {
            let api = api.clone();
            let store = store.clone();
            spawn_local(async move {
                let actions = AppActions::new(api.client(), &store, &shell);
                if let Some(list) = actions.load_products().await {
                    set_products.set(list);
                }
                set_loading.set(false);
            });
        });
    }

    let is_empty = move || products.with(|list| list.is_empty());

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Shop"</h2>

            <Show when=move || loading.get() && is_empty()>
                <div class="text-center py-12">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || !loading.get() && is_empty()>
                <p class="text-center text-base-content/50 py-12">"No products available."</p>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <For
                    each=move || products.get()
                    key=|product| (product.id, product.stock)
                    children=move |product| {
                        let (badge_class, badge_text) = stock_badge(product.stock);
                        let sold_out = product.stock == 0;
                        let label = buy_label(product.stock);
                        let price_text = price_label(product.price);

                        let on_buy = {
                            let api = api.clone();
                            let store = session.store.clone();
                            let (id, price) = (product.id, product.price);
                            move |_| {
                                let api = api.clone();
                                let store = store.clone();
                                spawn_local(async move {
                                    let actions = AppActions::new(api.client(), &store, &shell);
                                    if let Some(list) = actions.purchase(id, price).await {
                                        set_products.set(list);
                                    }
                                });
                            }
                        };

                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <span class=badge_class>{badge_text}</span>
                                    <h3 class="card-title">{product.name.clone()}</h3>
                                    <div class="flex items-center justify-between mt-2">
                                        <span class="text-2xl font-bold text-primary">{price_text}</span>
                                        <button
                                            class="btn btn-primary"
                                            disabled=sold_out
                                            on:click=on_buy
                                        >
                                            {label}
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
