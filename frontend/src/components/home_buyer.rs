//! 买家首页：轮播、商品列表、加购

use crate::api::{Api, ApiError};
use crate::auth::{force_logout, use_auth};
use crate::components::cart::{CartDrawer, use_cart};
use crate::components::home::{SortMode, filter_by_title, newest_first};
use crate::components::icons::*;
use crate::components::navbar::Navbar;
use crate::components::toast::use_notifier;
use crate::web::timer::Interval;
use bluecart_shared::{Product, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 轮播自动翻页间隔（毫秒）
const CAROUSEL_TICK_MS: u32 = 5_000;
/// 轮播展示的随机商品数
const CAROUSEL_SIZE: usize = 5;

/// 从列表中随机抽取至多 n 件商品
fn pick_random(products: &[Product], n: usize) -> Vec<Product> {
    let mut pool: Vec<Product> = products.to_vec();
    let mut picked = Vec::new();
    while picked.len() < n && !pool.is_empty() {
        let idx = (js_sys::Math::random() * pool.len() as f64) as usize;
        picked.push(pool.swap_remove(idx.min(pool.len() - 1)));
    }
    picked
}

#[component]
pub fn BuyerHome() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let cart = use_cart();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (carousel, set_carousel) = signal(Vec::<Product>::new());
    let (carousel_index, set_carousel_index) = signal(0usize);
    let (query, set_query) = signal(String::new());
    let (sort_mode, set_sort_mode) = signal(SortMode::Default);

    let handle_api_error = move |e: ApiError| {
        if matches!(e, ApiError::SessionExpired) {
            force_logout(&auth);
        }
        notifier.error(e.to_string());
    };

    // 初始加载全部商品
    spawn_local(async move {
        match Api::new().products().await {
            Ok(data) => {
                let sorted = newest_first(data);
                set_carousel.set(pick_random(&sorted, CAROUSEL_SIZE));
                set_products.set(sorted);
            }
            Err(e) => handle_api_error(e),
        }
    });

    // 轮播自动翻页；组件卸载即停表
    let step_carousel = move |delta: isize| {
        let len = carousel.get_untracked().len();
        if len > 1 {
            set_carousel_index
                .update(|i| *i = (*i as isize + delta).rem_euclid(len as isize) as usize);
        }
    };
    let ticker = Interval::new(CAROUSEL_TICK_MS, move || step_carousel(1));
    on_cleanup(move || drop(ticker));

    // 搜索在先、排序在后；搜索会把排序重置回默认
    let displayed = Memo::new(move |_| {
        let base = filter_by_title(&products.get(), &query.get());
        sort_mode.get().apply(&base)
    });

    let on_search = Callback::new(move |q: String| {
        set_query.set(q);
        set_sort_mode.set(SortMode::Default);
    });

    let handle_add_to_cart = move |product: Product| {
        spawn_local(async move {
            match Api::new().add_to_cart(product.id).await {
                Ok(_) => {
                    cart.bump();
                    notifier.success(format!("Added {} to cart!", product.title));
                }
                Err(e) => handle_api_error(e),
            }
        });
    };

    let current_slide = move || {
        carousel.with(|c| {
            if c.is_empty() {
                None
            } else {
                c.get(carousel_index.get() % c.len()).cloned()
            }
        })
    };

    view! {
        <CartDrawer />
        <main class="min-h-screen bg-base-200 p-4">
            <Navbar role=Role::Buyer on_search=on_search />

            // 轮播
            <Show when=move || !carousel.get().is_empty()>
                <div class="flex items-center justify-center gap-4 mb-10">
                    <button
                        class="btn btn-circle btn-ghost"
                        aria-label="Previous"
                        on:click=move |_| step_carousel(-1)
                    >
                        <ChevronLeft attr:class="h-7 w-7" />
                    </button>
                    <div class="relative w-[420px] h-[280px]">
                        {move || current_slide().map(|p| view! {
                            <img
                                src=p.image_url.clone()
                                alt=p.title.clone()
                                class="w-full h-full object-cover rounded-2xl shadow-lg"
                            />
                            <div class="absolute bottom-3 left-1/2 -translate-x-1/2 bg-base-100/80 px-4 py-1 rounded-lg shadow font-semibold">
                                {p.title}
                            </div>
                        })}
                    </div>
                    <button
                        class="btn btn-circle btn-ghost"
                        aria-label="Next"
                        on:click=move |_| step_carousel(1)
                    >
                        <ChevronRight attr:class="h-7 w-7" />
                    </button>
                </div>
            </Show>

            // 排序按钮
            <div class="mb-4 flex gap-2">
                <button
                    class="btn btn-sm"
                    on:click=move |_| set_sort_mode.update(|m| *m = m.next())
                >
                    {move || sort_mode.get().label()}
                </button>
            </div>

            // 商品卡片
            <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6">
                <For
                    each=move || displayed.get()
                    key=|p| p.id
                    children=move |product| {
                        let for_cart = product.clone();
                        view! {
                            <div class="card bg-base-100 shadow-lg hover:shadow-2xl transition-all">
                                <figure>
                                    <img
                                        src=product.image_url.clone()
                                        alt=product.title.clone()
                                        class="w-full h-40 object-cover"
                                    />
                                </figure>
                                <div class="card-body p-4">
                                    <h2 class="card-title text-lg">{product.title.clone()}</h2>
                                    <p class="text-sm text-base-content/70">{product.description.clone()}</p>
                                    <p class="font-semibold text-primary">{product.price} " IDR"</p>
                                    <p class="text-xs">"Stock: " <span class="font-bold">{product.quantity}</span></p>
                                    <button
                                        class="btn btn-primary btn-sm mt-2"
                                        on:click=move |_| handle_add_to_cart(for_cart.clone())
                                    >
                                        <ShoppingCart attr:class="h-4 w-4" /> "Add to Cart"
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </main>
    }
}
