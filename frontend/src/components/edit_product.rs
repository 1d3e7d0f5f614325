//! 卖家编辑商品页：预填现有字段，未换图时沿用原图

use crate::api::{Api, ApiError};
use crate::auth::{force_logout, use_auth};
use crate::components::toast::use_notifier;
use crate::upload::upload_image;
use crate::web::router::use_router;
use bluecart_shared::ProductPayload;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn EditProductPage(
    /// 要编辑的商品 id（来自路由）
    product_id: u64,
) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let router = use_router();

    let (title, set_title) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (quantity, set_quantity) = signal(String::new());
    let (image_url, set_image_url) = signal(String::new());
    let (file, set_file) = signal_local(Option::<web_sys::File>::None);
    let (loading, set_loading) = signal(true);
    let (submitting, set_submitting) = signal(false);

    let handle_api_error = move |e: ApiError| {
        if matches!(e, ApiError::SessionExpired) {
            force_logout(&auth);
        }
        notifier.error(e.to_string());
    };

    // 预填现有字段
    spawn_local(async move {
        match Api::new().seller_product(product_id).await {
            Ok(p) => {
                set_title.set(p.title);
                set_category.set(p.category);
                set_price.set(p.price.to_string());
                set_description.set(p.description);
                set_quantity.set(p.quantity.to_string());
                set_image_url.set(p.image_url);
            }
            Err(e) => handle_api_error(e),
        }
        set_loading.set(false);
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        match input.files().and_then(|list| list.get(0)) {
            Some(f) if f.type_() == "image/jpeg" || f.type_() == "image/png" => {
                set_file.set(Some(f));
            }
            Some(_) => {
                notifier.error("Only PNG or JPG files are allowed.");
                input.set_value("");
            }
            None => set_file.set(None),
        }
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get().is_empty() || category.get().is_empty() || description.get().is_empty() {
            notifier.error("Complete all fields.");
            return;
        }
        let Ok(price) = price.get_untracked().parse::<i64>() else {
            notifier.error("Price must be a number.");
            return;
        };
        let quantity = quantity.get_untracked().parse::<u32>().unwrap_or(1);

        set_submitting.set(true);
        spawn_local(async move {
            // 换了图就重新上传，否则沿用原 URL
            let image_url = match file.get_untracked() {
                Some(f) => match upload_image(&f).await {
                    Ok(url) => url,
                    Err(e) => {
                        notifier.error(e.to_string());
                        set_submitting.set(false);
                        return;
                    }
                },
                None => image_url.get_untracked(),
            };

            let payload = ProductPayload {
                title: title.get_untracked(),
                category: category.get_untracked(),
                price,
                description: description.get_untracked(),
                image_url,
                quantity,
            };

            match Api::new().update_product(product_id, &payload).await {
                Ok(_) => {
                    notifier.success("Product updated successfully!");
                    router.navigate("/home");
                }
                Err(e) => handle_api_error(e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <main class="min-h-screen flex items-center justify-center bg-base-200 p-4">
            <div class="card w-full max-w-2xl bg-base-100 shadow-2xl">
                <div class="card-body">
                    <h1 class="card-title text-3xl justify-center mb-2">"Edit Product"</h1>

                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="flex justify-center py-8">
                                <span class="loading loading-spinner loading-lg"></span>
                            </div>
                        }
                    >
                        <form on:submit=on_submit>
                            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                <div class="flex flex-col gap-4">
                                    <input
                                        placeholder="Title"
                                        prop:value=title
                                        on:input=move |ev| set_title.set(event_target_value(&ev))
                                        class="input input-bordered"
                                    />
                                    <input
                                        placeholder="Category"
                                        prop:value=category
                                        on:input=move |ev| set_category.set(event_target_value(&ev))
                                        class="input input-bordered"
                                    />
                                    <input
                                        type="number"
                                        placeholder="Price"
                                        prop:value=price
                                        on:input=move |ev| set_price.set(event_target_value(&ev))
                                        class="input input-bordered"
                                    />
                                    <input
                                        type="number"
                                        min="1"
                                        placeholder="Quantity"
                                        prop:value=quantity
                                        on:input=move |ev| set_quantity.set(event_target_value(&ev))
                                        class="input input-bordered"
                                    />
                                </div>
                                <div class="flex flex-col gap-4">
                                    <textarea
                                        placeholder="Description"
                                        prop:value=description
                                        on:input=move |ev| set_description.set(event_target_value(&ev))
                                        class="textarea textarea-bordered min-h-[120px]"
                                    ></textarea>
                                    <Show when=move || !image_url.get().is_empty()>
                                        <img
                                            src=move || image_url.get()
                                            alt="Current image"
                                            class="w-full h-32 object-cover rounded-lg border"
                                        />
                                    </Show>
                                    <input
                                        type="file"
                                        accept="image/png,image/jpeg"
                                        class="file-input file-input-bordered"
                                        on:change=on_file_change
                                    />
                                </div>
                            </div>

                            <div class="flex gap-4 justify-center mt-6">
                                <button class="btn btn-primary px-8" disabled=move || submitting.get()>
                                    {move || if submitting.get() { "Saving..." } else { "Save" }}
                                </button>
                                <button
                                    type="button"
                                    class="btn btn-ghost px-8"
                                    on:click=move |_| router.navigate("/home")
                                >
                                    "Cancel"
                                </button>
                            </div>
                        </form>
                    </Show>
                </div>
            </div>
        </main>
    }
}
