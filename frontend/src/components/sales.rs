//! 卖家销售页：订单列表、每单计时与发货/取消操作
//!
//! 每单的计时信息并发拉取，各自到达后合并进映射（后写覆盖）；
//! 单个订单的计时失败只影响该单的倒计时展示，不影响列表。

use crate::api::{Api, ApiError};
use crate::auth::{force_logout, use_auth};
use crate::components::navbar::Navbar;
use crate::components::toast::use_notifier;
use crate::countdown::{self, TICK_MS};
use crate::web::timer::Interval;
use bluecart_shared::{Order, OrderStatus, Role, TimerType, TimingInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

#[component]
pub fn SalesPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (timings, set_timings) = signal(HashMap::<u64, TimingInfo>::new());
    let (now_ts, set_now) = signal(countdown::now());

    let ticker = Interval::new(TICK_MS, move || set_now.set(countdown::now()));
    on_cleanup(move || drop(ticker));

    let handle_api_error = move |e: ApiError| {
        if matches!(e, ApiError::SessionExpired) {
            force_logout(&auth);
        }
        notifier.error(e.to_string());
    };

    let fetch_orders_and_timings = move || {
        spawn_local(async move {
            match Api::new().seller_orders().await {
                Ok(mut data) => {
                    // 最新订单在前
                    data.sort_by(|a, b| b.order_id.cmp(&a.order_id));

                    set_timings.set(HashMap::new());
                    for order in &data {
                        let id = order.order_id;
                        spawn_local(async move {
                            if let Ok(t) = Api::new().order_timing(id).await {
                                set_timings.update(|map| {
                                    map.insert(id, t);
                                });
                            }
                        });
                    }
                    set_orders.set(data);
                }
                Err(e) => {
                    handle_api_error(e);
                    set_orders.set(Vec::new());
                    set_timings.set(HashMap::new());
                }
            }
        });
    };
    fetch_orders_and_timings();

    let handle_ship = move |order_id: u64| {
        spawn_local(async move {
            match Api::new().ship_order(order_id).await {
                Ok(text) => {
                    notifier.success(if text.is_empty() {
                        "Item shipped!".to_string()
                    } else {
                        text
                    });
                    fetch_orders_and_timings();
                }
                Err(e) => handle_api_error(e),
            }
        });
    };

    let handle_cancel = move |order_id: u64| {
        spawn_local(async move {
            match Api::new().cancel_order(order_id).await {
                Ok(text) => {
                    notifier.success(if text.is_empty() {
                        "Order cancelled.".to_string()
                    } else {
                        text
                    });
                    fetch_orders_and_timings();
                }
                Err(e) => handle_api_error(e),
            }
        });
    };

    view! {
        <main class="min-h-screen bg-base-200 p-4">
            <Navbar role=Role::Seller />

            <div class="max-w-3xl mx-auto space-y-6">
                <h1 class="text-2xl font-bold">"Sales Orders"</h1>

                <For
                    each=move || orders.get()
                    key=|o| o.order_id
                    children=move |order| {
                        let id = order.order_id;
                        let status = order.status;
                        let timer_state = move || {
                            timings.with(|map| {
                                map.get(&id).map(|t| {
                                    (t.timer_type, countdown::countdown_label(t, now_ts.get()))
                                })
                            })
                        };

                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <div class="flex justify-between items-center text-sm mb-2">
                                        <span>
                                            "Order #" {id} " • Status: "
                                            <span class="font-bold text-primary">{status.as_str()}</span>
                                        </span>
                                        {move || match timer_state() {
                                            Some((TimerType::Shipment, Some(left))) => view! {
                                                <span class="text-error">"Ship in: " {left}</span>
                                            }
                                            .into_any(),
                                            Some((TimerType::Payment, _)) => view! {
                                                <span class="text-warning">"Waiting for payment..."</span>
                                            }
                                            .into_any(),
                                            _ => ().into_any(),
                                        }}
                                    </div>

                                    <ul class="space-y-2 mb-3">
                                        {order
                                            .items
                                            .iter()
                                            .map(|item| view! {
                                                <li class="flex gap-3 items-center">
                                                    <img
                                                        src=item.image_url.clone().unwrap_or_default()
                                                        alt=item.product_title.clone()
                                                        class="w-16 h-16 rounded border object-cover"
                                                    />
                                                    <div>
                                                        <p class="font-medium">{item.product_title.clone()}</p>
                                                        <p class="text-sm text-base-content/70">
                                                            {item.quantity} " × " {item.unit_price} " IDR"
                                                        </p>
                                                    </div>
                                                </li>
                                            })
                                            .collect_view()}
                                    </ul>

                                    <div class="flex gap-3">
                                        <Show when=move || status == OrderStatus::Paid>
                                            <button
                                                class="btn btn-success btn-sm"
                                                on:click=move |_| handle_ship(id)
                                            >
                                                "Ship"
                                            </button>
                                        </Show>
                                        <Show when=move || {
                                            status == OrderStatus::Paid || status == OrderStatus::Pending
                                        }>
                                            <button
                                                class="btn btn-error btn-sm"
                                                on:click=move |_| handle_cancel(id)
                                            >
                                                "Cancel"
                                            </button>
                                        </Show>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </main>
    }
}
