//! BlueCart 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session` / `gateway`: 会话存储与带刷新重放的认证请求网关
//! - `web::route` / `web::router`: 路由定义（领域模型）与路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `countdown`: 订单倒计时的纯计算层
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod countdown;
mod gateway;
mod session;
mod upload;

mod components {
    pub mod cart;
    pub mod create_product;
    pub mod edit_product;
    pub mod home;
    pub mod home_buyer;
    pub mod home_seller;
    mod icons;
    pub mod login;
    pub mod navbar;
    pub mod payment;
    pub mod register;
    pub mod sales;
    pub mod toast;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::cart::CartContext;
use crate::components::create_product::CreateProductPage;
use crate::components::edit_product::EditProductPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::payment::PaymentPage;
use crate::components::register::RegisterPage;
use crate::components::sales::SalesPage;
use crate::components::toast::{Notifier, ToastHost};

use leptos::prelude::*;

// 浏览器原生 API 封装模块
// 路由、fetch、定时器对 web_sys 的调用都收拢在这里。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod timer;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::CreateProduct => view! { <CreateProductPage /> }.into_any(),
        AppRoute::EditProduct(id) => view! { <EditProductPage product_id=id /> }.into_any(),
        AppRoute::Payment => view! { <PaymentPage /> }.into_any(),
        AppRoute::Sales => view! { <SalesPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文并从 LocalStorage 恢复会话镜像
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 2. 全局通知与购物车刷新上下文
    provide_context(Notifier::new());
    provide_context(CartContext::new());

    // 3. 认证状态信号注入路由服务（解耦）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <ToastHost />
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
