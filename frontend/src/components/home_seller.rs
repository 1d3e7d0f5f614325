//! 卖家首页：本店商品列表与增删改入口

use crate::api::{Api, ApiError};
use crate::auth::{force_logout, use_auth};
use crate::components::home::{SortMode, filter_by_title, newest_first};
use crate::components::icons::*;
use crate::components::navbar::Navbar;
use crate::components::toast::use_notifier;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use bluecart_shared::{Product, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn SellerHome() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let router = use_router();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (query, set_query) = signal(String::new());
    let (sort_mode, set_sort_mode) = signal(SortMode::Default);
    // 待确认删除的商品 id
    let (pending_delete, set_pending_delete) = signal(Option::<u64>::None);

    let handle_api_error = move |e: ApiError| {
        if matches!(e, ApiError::SessionExpired) {
            force_logout(&auth);
        }
        notifier.error(e.to_string());
    };

    // 初始加载本店商品
    if let Some(seller_id) = auth.state.get_untracked().session.map(|s| s.user_id) {
        spawn_local(async move {
            match Api::new().seller_products(&seller_id).await {
                Ok(data) => set_products.set(newest_first(data)),
                Err(e) => handle_api_error(e),
            }
        });
    }

    let displayed = Memo::new(move |_| {
        let base = filter_by_title(&products.get(), &query.get());
        sort_mode.get().apply(&base)
    });

    let on_search = Callback::new(move |q: String| {
        set_query.set(q);
        set_sort_mode.set(SortMode::Default);
    });

    let handle_delete = move |product_id: u64| {
        let Some(seller_id) = auth.user_id() else {
            return;
        };
        spawn_local(async move {
            match Api::new().delete_product(&seller_id, product_id).await {
                Ok(text) => {
                    set_products.update(|list| list.retain(|p| p.id != product_id));
                    notifier.success(if text.is_empty() {
                        "Product deleted.".to_string()
                    } else {
                        text
                    });
                }
                Err(e) => handle_api_error(e),
            }
        });
    };

    view! {
        <main class="min-h-screen bg-base-200 p-4">
            <Navbar role=Role::Seller on_search=on_search />

            <div class="mb-4 flex gap-2">
                <button
                    class="btn btn-primary btn-sm gap-2"
                    on:click=move |_| router.navigate("/create-product")
                >
                    <Plus attr:class="h-4 w-4" /> "Create Product"
                </button>
                <button
                    class="btn btn-sm"
                    on:click=move |_| set_sort_mode.update(|m| *m = m.next())
                >
                    {move || sort_mode.get().label()}
                </button>
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-6">
                <For
                    each=move || displayed.get()
                    key=|p| p.id
                    children=move |product| {
                        let id = product.id;
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

                                    <Show
                                        when=move || pending_delete.get() != Some(id)
                                        fallback=move || view! {
                                            <div class="flex flex-col gap-2 mt-2 text-sm">
                                                <p>"Delete this product?"</p>
                                                <div class="flex gap-2">
                                                    <button
                                                        class="btn btn-error btn-sm"
                                                        on:click=move |_| {
                                                            set_pending_delete.set(None);
                                                            handle_delete(id);
                                                        }
                                                    >
                                                        "Yes"
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm"
                                                        on:click=move |_| set_pending_delete.set(None)
                                                    >
                                                        "Cancel"
                                                    </button>
                                                </div>
                                            </div>
                                        }
                                    >
                                        <div class="flex gap-2 mt-2">
                                            <button
                                                class="btn btn-primary btn-sm gap-1"
                                                on:click=move |_| router.navigate_to(AppRoute::EditProduct(id))
                                            >
                                                <Pencil attr:class="h-4 w-4" /> "Edit"
                                            </button>
                                            <button
                                                class="btn btn-error btn-sm gap-1"
                                                on:click=move |_| set_pending_delete.set(Some(id))
                                            >
                                                <Trash attr:class="h-4 w-4" /> "Delete"
                                            </button>
                                        </div>
                                    </Show>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </main>
    }
}
