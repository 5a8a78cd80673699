//! 订单视图
//!
//! 按当前会话的用户 id 加载订单列表；进入视图即触发加载。

use crate::actions::{AppActions, UiShell};
use crate::api::use_api;
use crate::notify::use_notify;
use crate::session::use_session;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use openstall_shared::Order;

#[component]
pub fn OrdersPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let shell = UiShell::new(use_notify(), use_router());

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);

    {
        let api = api.clone();
        let store = session.store.clone();
        Effect::new(move |_| {
            let api = api.clone();
            let store = store.clone();
            spawn_local(async move {
                let actions = AppActions::new(api.client(), &store, &shell);
                if let Some(list) = actions.load_orders().await {
                    set_orders.set(list);
                }
                set_loading.set(false);
            });
        });
    }

    let is_empty = move || orders.with(|list| list.is_empty());

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"My Orders"</h2>

            <Show when=move || loading.get() && is_empty()>
                <div class="text-center py-12">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || !loading.get() && is_empty()>
                <p class="text-center text-base-content/50 py-12">"No orders yet."</p>
            </Show>

            <For
                each=move || orders.get()
                key=|order| order.id
                children=move |order| {
                    view! {
                        <div class="card bg-base-100 shadow mb-4">
                            <div class="card-body py-4 flex-row justify-between items-center">
                                <div>
                                    <strong>{format!("Order #{}", order.id)}</strong>
                                    <div>{format!("Product ID: {}", order.product_id)}</div>
                                    <div class="text-sm text-base-content/60">
                                        {format!("Qty: {} • Status: {}", order.quantity, order.status)}
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
