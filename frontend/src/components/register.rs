use crate::auth::{force_logout, register, use_auth};
use crate::components::toast::use_notifier;
use crate::upload::upload_image;
use crate::web::router::use_router;
use bluecart_shared::{RegisterRequest, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let router = use_router();

    // 与登录页一致：加载即整体清除会话
    force_logout(&auth);

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::Buyer);
    let (national_id, set_national_id) = signal(String::new());
    // web_sys::File 不跨线程，使用本地信号
    let (file, set_file) = signal_local(Option::<web_sys::File>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let picked = input.files().and_then(|list| list.get(0));
        match picked {
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
        if username.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            // 头像可选：选择了文件就先直传图床拿 URL
            let profile_image_url = match file.get_untracked() {
                Some(f) => match upload_image(&f).await {
                    Ok(url) => Some(url),
                    Err(e) => {
                        set_error_msg.set(Some(e.to_string()));
                        set_is_submitting.set(false);
                        return;
                    }
                },
                None => None,
            };

            let national_id = {
                let id = national_id.get_untracked();
                (!id.trim().is_empty()).then(|| id.trim().to_string())
            };

            let req = RegisterRequest {
                username: username.get_untracked(),
                password: password.get_untracked(),
                role: role.get_untracked(),
                national_id,
                profile_image_url,
            };

            match register(&req).await {
                Ok(()) => {
                    notifier.success("Account created, please log in.");
                    router.navigate("/");
                }
                Err(e) => set_error_msg.set(Some(e.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"Register"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Username"</span></label>
                            <input
                                type="text"
                                placeholder="Username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Password"</span></label>
                            <input
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Role"</span></label>
                            <select
                                class="select select-bordered"
                                on:change=move |ev| {
                                    if let Some(r) = Role::parse(&event_target_value(&ev)) {
                                        set_role.set(r);
                                    }
                                }
                            >
                                <option value="BUYER" selected=move || role.get() == Role::Buyer>
                                    "Buyer"
                                </option>
                                <option value="SELLER" selected=move || role.get() == Role::Seller>
                                    "Seller"
                                </option>
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"National ID (optional)"</span></label>
                            <input
                                type="text"
                                placeholder="National ID"
                                on:input=move |ev| set_national_id.set(event_target_value(&ev))
                                prop:value=national_id
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Profile picture (optional)"</span></label>
                            <input
                                type="file"
                                accept="image/png,image/jpeg"
                                class="file-input file-input-bordered"
                                on:change=on_file_change
                            />
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="mt-4 text-center text-base-content/70">
                            "Already have an account? "
                            <a class="link link-primary" on:click=move |_| router.navigate("/")>
                                "Login"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
