//! 顶部导航栏：品牌、搜索框与按角色显示的页面入口

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::web::router::use_router;
use bluecart_shared::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn Navbar(
    /// 当前角色，决定显示 Payment 还是 Sales 入口
    role: Role,
    /// 搜索回调；无列表的页面不传
    #[prop(optional, into)]
    on_search: Option<Callback<String>>,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let placeholder = match role {
        Role::Buyer => "Search all products...",
        Role::Seller => "Search your products...",
    };

    let on_input = move |ev| {
        if let Some(cb) = on_search {
            cb.run(event_target_value(&ev));
        }
    };

    let on_logout = move |_| {
        spawn_local(async move {
            // 清除会话后路由服务会自动回到登录页
            logout(&auth).await;
        });
    };

    view! {
        <div class="navbar bg-primary text-primary-content rounded-box shadow-xl mb-6">
            <div class="flex-1 gap-2">
                <Storefront attr:class="h-6 w-6" />
                <a class="btn btn-ghost text-xl" on:click=move |_| router.navigate("/home")>
                    "BlueCart"
                </a>
            </div>

            <Show when=move || on_search.is_some()>
                <div class="flex-none mx-4 w-full max-w-xs">
                    <input
                        type="text"
                        placeholder=placeholder
                        on:input=on_input
                        class="input input-bordered w-full text-base-content"
                    />
                </div>
            </Show>

            <div class="flex-none gap-2">
                {match role {
                    Role::Buyer => view! {
                        <button class="btn btn-ghost" on:click=move |_| router.navigate("/payment")>
                            "Payment"
                        </button>
                    }
                    .into_any(),
                    Role::Seller => view! {
                        <button class="btn btn-ghost" on:click=move |_| router.navigate("/sales")>
                            "Sales"
                        </button>
                    }
                    .into_any(),
                }}
                <button on:click=on_logout class="btn btn-outline gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Logout"
                </button>
            </div>
        </div>
    }
}
