//! 买家支付页：当前订单详情与支付/发货倒计时
//!
//! 计时基准来自后端的 TimingInfo；本地仅每秒驱动一次 `now` 信号
//! 重新渲染剩余时间。任何状态变更后整体重新拉取订单与计时。

use crate::api::{Api, ApiError};
use crate::auth::{force_logout, use_auth};
use crate::components::navbar::Navbar;
use crate::components::toast::use_notifier;
use crate::countdown::{self, TICK_MS};
use crate::session::{KEY_ORDER_ID, LocalSessionStore};
use crate::web::timer::Interval;
use bluecart_shared::{Order, OrderStatus, Role, TimerType, TimingInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn PaymentPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();

    // 活跃订单 id；缺失按"尚无订单"处理
    let order_id: Option<u64> =
        LocalSessionStore::get_raw(KEY_ORDER_ID).and_then(|s| s.parse().ok());

    let (order, set_order) = signal(Option::<Order>::None);
    let (timing, set_timing) = signal(Option::<TimingInfo>::None);
    let (loading, set_loading) = signal(true);
    let (now_ts, set_now) = signal(countdown::now());

    let ticker = Interval::new(TICK_MS, move || set_now.set(countdown::now()));
    on_cleanup(move || drop(ticker));

    let handle_api_error = move |e: ApiError| {
        if matches!(e, ApiError::SessionExpired) {
            force_logout(&auth);
        }
        notifier.error(e.to_string());
    };

    let fetch_order_and_timing = move || {
        let Some(order_id) = order_id else {
            set_loading.set(false);
            return;
        };
        spawn_local(async move {
            let api = Api::new();
            match api.order_timing(order_id).await {
                Ok(t) => set_timing.set(Some(t)),
                Err(e) => {
                    set_timing.set(None);
                    handle_api_error(e);
                }
            }
            match api.checkout_order(order_id).await {
                Ok(o) => set_order.set(Some(o)),
                Err(e) => {
                    set_order.set(None);
                    handle_api_error(e);
                }
            }
            set_loading.set(false);
        });
    };
    fetch_order_and_timing();

    let handle_pay = move |_| {
        let Some(o) = order.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match Api::new().pay_order(o.order_id).await {
                Ok(text) => {
                    notifier.success(if text.is_empty() {
                        "Payment successful!".to_string()
                    } else {
                        text
                    });
                    // 支付改变了计时基准，整体重新拉取
                    fetch_order_and_timing();
                }
                Err(e) => handle_api_error(e),
            }
        });
    };

    let countdown_text = move || {
        timing
            .get()
            .and_then(|t| countdown::countdown_label(&t, now_ts.get()))
    };
    let timer_type = move || timing.get().map(|t| t.timer_type).unwrap_or_default();

    view! {
        <main class="min-h-screen bg-base-200 p-4">
            <Navbar role=Role::Buyer />

            <div class="max-w-4xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold">"Your Orders"</h1>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="text-base-content/70">"Loading order..."</p> }
                >
                    {move || match order.get() {
                        None => view! {
                            <p class="text-lg text-base-content/70">
                                "You haven't bought anything yet."
                            </p>
                        }
                        .into_any(),
                        Some(o) => {
                            let status = o.status;
                            view! {
                                <div class="card bg-base-100 shadow-md">
                                    <div class="card-body">
                                        <div class="flex justify-between items-center text-sm mb-2">
                                            <span>
                                                <strong class="text-primary">"Order #" {o.order_id}</strong>
                                                " • "
                                                <span class="font-semibold">{status.as_str()}</span>
                                            </span>

                                            {move || match (timer_type(), countdown_text()) {
                                                (TimerType::Payment, Some(left)) => view! {
                                                    <span class="text-error font-medium">"Pay in: " {left}</span>
                                                }
                                                .into_any(),
                                                (TimerType::Shipment, Some(left)) => view! {
                                                    <span class="text-warning font-medium">"Seller ships in: " {left}</span>
                                                }
                                                .into_any(),
                                                _ => ().into_any(),
                                            }}
                                        </div>

                                        <ul class="divide-y divide-base-300 mb-4">
                                            {o.items
                                                .iter()
                                                .map(|item| view! {
                                                    <li class="py-3 flex items-center gap-4">
                                                        <img
                                                            src=item.image_url.clone().unwrap_or_default()
                                                            alt=item.product_title.clone()
                                                            class="w-16 h-16 object-cover rounded-lg border"
                                                        />
                                                        <div class="flex-1">
                                                            <p class="font-semibold">{item.product_title.clone()}</p>
                                                            <p class="text-sm text-base-content/70">
                                                                {item.quantity} " × " {item.unit_price} " IDR"
                                                            </p>
                                                        </div>
                                                    </li>
                                                })
                                                .collect_view()}
                                        </ul>

                                        <Show when=move || status == OrderStatus::Pending>
                                            <button class="btn btn-primary w-fit" on:click=handle_pay>
                                                "Pay Now"
                                            </button>
                                        </Show>
                                    </div>
                                </div>
                            }
                            .into_any()
                        }
                    }}
                </Show>
            </div>
        </main>
    }
}
