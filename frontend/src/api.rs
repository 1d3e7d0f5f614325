//! API 客户端模块
//!
//! 认证网关之上的薄类型层：每个后端操作一个方法，统一返回
//! 分类后的 `ApiError`，视图层据此提示用户而无需解析错误字符串。
//! 除网关内的单次刷新重放外，任何失败都不自动重试。

use crate::config;
use crate::gateway::{AuthGateway, GatewayError, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::session::{LocalSessionStore, SessionStore};
use crate::web::http::FetchTransport;
use bluecart_shared::{
    AddToCartRequest, CartItem, LoginRequest, LoginResponse, LogoutRequest, Order, Product,
    ProductPayload, RegisterRequest, TimingInfo,
};
use serde::de::DeserializeOwned;

// =========================================================
// 错误分类
// =========================================================

/// API 层错误分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 传输层失败，未得到 HTTP 响应
    Network(String),
    /// 会话已终止（网关刷新失败后），需要重新登录
    SessionExpired,
    /// 后端返回非 2xx，message 为响应体原文
    Backend { status: u16, message: String },
    /// 2xx 响应但响应体无法解析
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::SessionExpired => write!(f, "Session expired, please log in again"),
            ApiError::Backend { status, message } => {
                if message.is_empty() {
                    write!(f, "Request failed (HTTP {})", status)
                } else {
                    write!(f, "{}", message)
                }
            }
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Network(msg) => ApiError::Network(msg),
            GatewayError::SessionExpired => ApiError::SessionExpired,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// 客户端
// =========================================================

pub struct StoreApi<S, T> {
    gateway: AuthGateway<S, T>,
    base_url: String,
}

/// 生产环境使用的具体客户端类型
pub type Api = StoreApi<LocalSessionStore, FetchTransport>;

impl Api {
    pub fn new() -> Self {
        Self::with(LocalSessionStore, FetchTransport, config::BACKEND_URL)
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SessionStore, T: HttpTransport> StoreApi<S, T> {
    pub fn with(store: S, transport: T, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let refresh_url = format!("{}/api/auth/refresh", base_url);
        Self {
            gateway: AuthGateway::new(store, transport, refresh_url),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decode<R: DeserializeOwned>(res: HttpResponse) -> ApiResult<R> {
        if !res.ok() {
            return Err(ApiError::Backend {
                status: res.status,
                message: res.body,
            });
        }
        res.json::<R>().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET 并解析 JSON 响应体
    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let res = self
            .gateway
            .send(HttpRequest::new(&self.url(path), HttpMethod::Get))
            .await?;
        Self::decode(res)
    }

    /// 发送（可带 JSON 体）并返回后端的纯文本响应体
    async fn send_text(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<String> {
        let mut req = HttpRequest::new(&self.url(path), method);
        if let Some(body) = body {
            req = req.with_json(body);
        }
        let res = self.gateway.send(req).await?;
        if res.ok() {
            Ok(res.body)
        } else {
            Err(ApiError::Backend {
                status: res.status,
                message: res.body,
            })
        }
    }

    // =====================================================
    // 认证
    // =====================================================

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        let body = serde_json::to_value(req).map_err(|e| ApiError::Decode(e.to_string()))?;
        let res = self
            .gateway
            .send(HttpRequest::new(&self.url("/api/auth/login"), HttpMethod::Post).with_json(body))
            .await?;
        Self::decode(res)
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<()> {
        let body = serde_json::to_value(req).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send_text(HttpMethod::Post, "/api/auth/register", Some(body))
            .await
            .map(|_| ())
    }

    /// 使指定的刷新令牌失效；访问令牌由网关自动附带
    pub async fn logout(&self, refresh_token: &str) -> ApiResult<()> {
        let body = serde_json::to_value(LogoutRequest {
            refresh_token: refresh_token.to_string(),
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send_text(HttpMethod::Post, "/api/auth/logout", Some(body))
            .await
            .map(|_| ())
    }

    // =====================================================
    // 商品
    // =====================================================

    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.get_json("/api/products").await
    }

    pub async fn seller_products(&self, seller_id: &str) -> ApiResult<Vec<Product>> {
        self.get_json(&format!("/api/products/seller/{}", seller_id))
            .await
    }

    pub async fn seller_product(&self, product_id: u64) -> ApiResult<Product> {
        self.get_json(&format!("/api/seller/products/{}", product_id))
            .await
    }

    pub async fn create_product(
        &self,
        seller_id: &str,
        payload: &ProductPayload,
    ) -> ApiResult<String> {
        let body = serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send_text(
            HttpMethod::Post,
            &format!("/api/products/{}", seller_id),
            Some(body),
        )
        .await
    }

    pub async fn update_product(
        &self,
        product_id: u64,
        payload: &ProductPayload,
    ) -> ApiResult<String> {
        let body = serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send_text(
            HttpMethod::Put,
            &format!("/api/seller/products/{}", product_id),
            Some(body),
        )
        .await
    }

    pub async fn delete_product(&self, seller_id: &str, product_id: u64) -> ApiResult<String> {
        self.send_text(
            HttpMethod::Delete,
            &format!("/api/products/{}/{}", seller_id, product_id),
            None,
        )
        .await
    }

    // =====================================================
    // 购物车
    // =====================================================

    pub async fn cart(&self, buyer_id: &str) -> ApiResult<Vec<CartItem>> {
        self.get_json(&format!("/api/buyer/carts/{}", buyer_id)).await
    }

    pub async fn add_to_cart(&self, product_id: u64) -> ApiResult<String> {
        let body = serde_json::to_value(AddToCartRequest { quantity: 1 })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send_text(
            HttpMethod::Post,
            &format!("/api/buyer/carts/add/{}", product_id),
            Some(body),
        )
        .await
    }

    pub async fn remove_from_cart(&self, buyer_id: &str, product_id: u64) -> ApiResult<String> {
        self.send_text(
            HttpMethod::Post,
            &format!("/api/buyer/carts/{}/remove/{}", buyer_id, product_id),
            None,
        )
        .await
    }

    pub async fn clear_cart(&self, buyer_id: &str) -> ApiResult<String> {
        self.send_text(
            HttpMethod::Post,
            &format!("/api/buyer/carts/{}/clear", buyer_id),
            None,
        )
        .await
    }

    // =====================================================
    // 订单与计时
    // =====================================================

    pub async fn seller_orders(&self) -> ApiResult<Vec<Order>> {
        self.get_json("/api/orders/seller").await
    }

    /// 每单计时信息；状态变更（支付/发货/取消）后必须重新拉取
    pub async fn order_timing(&self, order_id: u64) -> ApiResult<TimingInfo> {
        self.get_json(&format!("/api/orders/{}/timing", order_id))
            .await
    }

    pub async fn checkout_order(&self, order_id: u64) -> ApiResult<Order> {
        self.get_json(&format!("/api/checkout/{}", order_id)).await
    }

    pub async fn pay_order(&self, order_id: u64) -> ApiResult<String> {
        log::info!("paying order {}", order_id);
        self.send_text(HttpMethod::Post, &format!("/api/orders/{}/pay", order_id), None)
            .await
    }

    pub async fn ship_order(&self, order_id: u64) -> ApiResult<String> {
        self.send_text(HttpMethod::Post, &format!("/api/orders/{}/ship", order_id), None)
            .await
    }

    pub async fn cancel_order(&self, order_id: u64) -> ApiResult<String> {
        self.send_text(
            HttpMethod::Post,
            &format!("/api/orders/{}/cancel", order_id),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockTransport;
    use crate::session::MockSessionStore;
    use serde_json::json;

    fn api() -> StoreApi<MockSessionStore, MockTransport> {
        StoreApi::with(MockSessionStore::new(), MockTransport::new(), "http://api.test/")
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let api = api();
        api.gateway
            .transport()
            .enqueue_response("http://api.test/api/products", 200, json!([]));

        let products = api.products().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_backend_error_carries_status_and_body() {
        let api = api();
        api.gateway.transport().enqueue_response(
            "http://api.test/api/orders/7/pay",
            409,
            json!("Order already paid"),
        );

        let err = api.pay_order(7).await.unwrap_err();
        match err {
            ApiError::Backend { status, message } => {
                assert_eq!(status, 409);
                assert!(message.contains("Order already paid"));
            }
            other => panic!("expected Backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_decode_error_on_malformed_body() {
        let api = api();
        api.gateway.transport().enqueue_response(
            "http://api.test/api/orders/3/timing",
            200,
            json!({ "unexpected": true }),
        );

        let err = api.order_timing(3).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_text_endpoint_returns_body() {
        let api = api();
        api.gateway.transport().enqueue_response(
            "http://api.test/api/buyer/carts/add/5",
            200,
            json!("Added to cart"),
        );

        let text = api.add_to_cart(5).await.unwrap();
        assert!(text.contains("Added to cart"));
    }
}
