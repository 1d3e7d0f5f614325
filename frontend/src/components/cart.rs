//! 购物车模块：共享的刷新信号与滑出式抽屉

use crate::api::{Api, ApiError};
use crate::auth::{force_logout, use_auth};
use crate::components::icons::*;
use crate::components::toast::use_notifier;
use crate::web::router::use_router;
use bluecart_shared::CartItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 购物车刷新上下文
///
/// 任何地方改动购物车后调用 `bump()`，抽屉监听版本号重新拉取。
/// 替代原生事件广播，保持数据流经由信号。
#[derive(Clone, Copy)]
pub struct CartContext {
    version: ReadSignal<u32>,
    set_version: WriteSignal<u32>,
}

impl CartContext {
    pub fn new() -> Self {
        let (version, set_version) = signal(0);
        Self {
            version,
            set_version,
        }
    }

    pub fn bump(&self) {
        self.set_version.update(|v| *v += 1);
    }

    pub fn version(&self) -> ReadSignal<u32> {
        self.version
    }
}

/// 从 Context 获取购物车上下文
pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext should be provided")
}

/// 浮动按钮 + 滑出式购物车抽屉（仅买家首页挂载）
#[component]
pub fn CartDrawer() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let router = use_router();
    let cart = use_cart();

    let (open, set_open) = signal(false);
    let (items, set_items) = signal(Vec::<CartItem>::new());
    let (confirm_clear, set_confirm_clear) = signal(false);

    let handle_api_error = move |e: ApiError| {
        if matches!(e, ApiError::SessionExpired) {
            force_logout(&auth);
        }
        notifier.error(e.to_string());
    };

    let fetch_cart = move || {
        let Some(buyer_id) = auth.user_id() else {
            return;
        };
        spawn_local(async move {
            match Api::new().cart(&buyer_id).await {
                Ok(data) => set_items.set(data),
                Err(e) => handle_api_error(e),
            }
        });
    };

    // 初次加载，且每次 bump 后重新拉取
    Effect::new(move |_| {
        cart.version().get();
        fetch_cart();
    });

    let handle_remove = move |product_id: u64| {
        let Some(buyer_id) = auth.user_id() else {
            return;
        };
        spawn_local(async move {
            match Api::new().remove_from_cart(&buyer_id, product_id).await {
                Ok(text) => {
                    notifier.success(if text.is_empty() {
                        "Item removed.".to_string()
                    } else {
                        text
                    });
                    fetch_cart();
                }
                Err(e) => handle_api_error(e),
            }
        });
    };

    let handle_clear = move || {
        let Some(buyer_id) = auth.user_id() else {
            return;
        };
        spawn_local(async move {
            match Api::new().clear_cart(&buyer_id).await {
                Ok(text) => {
                    notifier.success(if text.is_empty() {
                        "Cart cleared.".to_string()
                    } else {
                        text
                    });
                    fetch_cart();
                }
                Err(e) => handle_api_error(e),
            }
        });
    };

    let total_items = move || items.with(|list| list.iter().map(|i| i.quantity).sum::<u32>());
    let total_price = move || {
        items.with(|list| {
            list.iter()
                .map(|i| i.quantity as i64 * i.product.price)
                .sum::<i64>()
        })
    };
    let is_empty = move || items.with(|list| list.is_empty());

    view! {
        // 浮动购物车按钮
        <Show when=move || !open.get()>
            <button
                class="btn btn-primary btn-circle btn-lg fixed bottom-8 right-8 z-40 shadow-2xl"
                on:click=move |_| set_open.set(true)
                aria-label="Open cart"
            >
                <ShoppingCart attr:class="h-7 w-7" />
                <Show when=move || { total_items() > 0 }>
                    <span class="badge badge-error absolute -top-2 -right-2">{total_items}</span>
                </Show>
            </button>
        </Show>

        // 滑出式抽屉
        <div class=move || {
            if open.get() {
                "fixed top-0 right-0 h-full w-80 bg-base-100 shadow-xl z-40 flex flex-col translate-x-0 transition-transform duration-300"
            } else {
                "fixed top-0 right-0 h-full w-80 bg-base-100 shadow-xl z-40 flex flex-col translate-x-full transition-transform duration-300"
            }
        }>
            <div class="p-4 bg-primary text-primary-content flex justify-between items-center">
                <h2 class="text-lg font-bold">"Your Cart"</h2>
                <button class="btn btn-ghost btn-sm" on:click=move |_| set_open.set(false)>
                    "✕"
                </button>
            </div>

            <div class="flex-1 overflow-y-auto p-4 space-y-4">
                <Show when=is_empty>
                    <p class="text-base-content/70">"Your cart is empty."</p>
                </Show>
                <For
                    each=move || items.get()
                    key=|item| item.id
                    children=move |item| {
                        let product_id = item.product.id;
                        view! {
                            <div class="flex items-center gap-4 border-b border-base-300 pb-2">
                                <img
                                    src=item.product.image_url.clone()
                                    alt=item.product.title.clone()
                                    class="w-16 h-16 object-cover rounded-lg border"
                                />
                                <div class="flex-1">
                                    <p class="font-semibold">{item.product.title.clone()}</p>
                                    <p class="text-sm">
                                        {item.quantity} " × " {item.product.price} " IDR"
                                    </p>
                                </div>
                                <button
                                    class="btn btn-ghost btn-sm text-error"
                                    title="Remove one"
                                    on:click=move |_| handle_remove(product_id)
                                >
                                    <Trash attr:class="h-4 w-4" />
                                </button>
                            </div>
                        }
                    }
                />
            </div>

            <div class="p-4 border-t border-base-300 space-y-3">
                <div class="flex justify-between">
                    <span class="font-semibold">"Total:"</span>
                    <span class="font-bold">{total_price} " IDR"</span>
                </div>

                <Show when=move || !is_empty() && !confirm_clear.get()>
                    <button
                        class="btn btn-error btn-block"
                        on:click=move |_| set_confirm_clear.set(true)
                    >
                        "Clear Cart"
                    </button>
                </Show>
                <Show when=move || confirm_clear.get()>
                    <div class="flex flex-col gap-2 text-sm">
                        <p>"Are you sure you want to clear the cart?"</p>
                        <div class="flex gap-2 justify-end">
                            <button
                                class="btn btn-error btn-sm"
                                on:click=move |_| {
                                    set_confirm_clear.set(false);
                                    handle_clear();
                                }
                            >
                                "Yes"
                            </button>
                            <button
                                class="btn btn-ghost btn-sm"
                                on:click=move |_| set_confirm_clear.set(false)
                            >
                                "Cancel"
                            </button>
                        </div>
                    </div>
                </Show>

                <button
                    class="btn btn-primary btn-block font-semibold"
                    disabled=is_empty
                    on:click=move |_| router.navigate("/payment")
                >
                    "Proceed to Payment"
                </button>
            </div>
        </div>
    }
}
