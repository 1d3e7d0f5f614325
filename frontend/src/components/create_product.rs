//! 卖家创建商品页

use crate::api::{Api, ApiError};
use crate::auth::{force_logout, use_auth};
use crate::components::toast::use_notifier;
use crate::upload::upload_image;
use crate::web::router::use_router;
use bluecart_shared::ProductPayload;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CreateProductPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let router = use_router();

    let (title, set_title) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (price, set_price) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (quantity, set_quantity) = signal(String::new());
    let (file, set_file) = signal_local(Option::<web_sys::File>::None);
    let (submitting, set_submitting) = signal(false);
    let (confirming, set_confirming) = signal(false);

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

    let request_submit = move |_| {
        if title.get().is_empty()
            || category.get().is_empty()
            || price.get().is_empty()
            || description.get().is_empty()
            || file.with(|f| f.is_none())
        {
            notifier.error("Complete all fields and upload an image.");
            return;
        }
        set_confirming.set(true);
    };

    let do_submit = move || {
        set_confirming.set(false);
        let Some(seller_id) = auth.user_id() else {
            return;
        };
        let Ok(price) = price.get_untracked().parse::<i64>() else {
            notifier.error("Price must be a number.");
            return;
        };
        // 数量留空或非法时默认 1
        let quantity = quantity.get_untracked().parse::<u32>().unwrap_or(1);

        set_submitting.set(true);
        spawn_local(async move {
            let Some(f) = file.get_untracked() else {
                set_submitting.set(false);
                return;
            };
            let image_url = match upload_image(&f).await {
                Ok(url) => url,
                Err(e) => {
                    notifier.error(e.to_string());
                    set_submitting.set(false);
                    return;
                }
            };

            let payload = ProductPayload {
                title: title.get_untracked(),
                category: category.get_untracked(),
                price,
                description: description.get_untracked(),
                image_url,
                quantity,
            };

            match Api::new().create_product(&seller_id, &payload).await {
                Ok(_) => {
                    notifier.success("Product created successfully!");
                    router.navigate("/home");
                }
                Err(e) => {
                    if matches!(e, ApiError::SessionExpired) {
                        force_logout(&auth);
                    }
                    notifier.error(e.to_string());
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <main class="min-h-screen flex items-center justify-center bg-base-200 p-4">
            <div class="card w-full max-w-2xl bg-base-100 shadow-2xl">
                <div class="card-body">
                    <h1 class="card-title text-3xl justify-center mb-2">"Create New Product"</h1>

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
                                placeholder="Quantity (default 1)"
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
                            <input
                                type="file"
                                accept="image/png,image/jpeg"
                                class="file-input file-input-bordered"
                                on:change=on_file_change
                            />
                        </div>
                    </div>

                    <Show
                        when=move || !confirming.get()
                        fallback=move || view! {
                            <div class="flex items-center gap-3 justify-center mt-4">
                                <p>"Submit this product?"</p>
                                <button class="btn btn-primary btn-sm" on:click=move |_| do_submit()>
                                    "Yes"
                                </button>
                                <button class="btn btn-ghost btn-sm" on:click=move |_| set_confirming.set(false)>
                                    "Cancel"
                                </button>
                            </div>
                        }
                    >
                        <div class="flex gap-4 justify-center mt-4">
                            <button
                                class="btn btn-primary px-8"
                                disabled=move || submitting.get()
                                on:click=request_submit
                            >
                                {move || if submitting.get() { "Submitting..." } else { "Submit" }}
                            </button>
                            <button class="btn btn-ghost px-8" on:click=move |_| router.navigate("/home")>
                                "Cancel"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </main>
    }
}
