//! 认证请求网关模块
//!
//! 对出站 HTTP 请求统一注入 Bearer 令牌，并在 401 时透明地执行
//! 一次"刷新令牌 -> 重放原请求"的恢复流程：
//! - 刷新成功：持久化新令牌并重放一次，重放再遇 401 不会二次刷新；
//! - 刷新失败：整体清除会话存储并以 `SessionExpired` 终止调用。
//!
//! 调用方因此永远不会观察到"仅因令牌过期"导致的 401。
//! 并发调用各自独立触发刷新，不做去重（单标签页场景下可接受）。
//!
//! 核心流程对平台无感知：通过 `HttpTransport` 与 `SessionStore`
//! 两个接口注入依赖，原生测试用内存 Mock 驱动。

use crate::session::SessionStore;
use bluecart_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION, RefreshRequest, RefreshResponse};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// 增加 Clone 以支持 401 后重放
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// 设置 JSON 请求体（同时声明 Content-Type）
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(body.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 响应是否成功 (2xx)
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// 网关层错误
///
/// 传输失败与"会话终止"是仅有的两种出口；
/// 非 2xx 的业务响应原样返回给调用方自行归类。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// 网络/传输层失败（请求未得到 HTTP 响应）
    Network(String),
    /// 刷新失败后的终态：会话已整体清除，需要重新登录
    SessionExpired,
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Network(msg) => write!(f, "network error: {}", msg),
            GatewayError::SessionExpired => write!(f, "session expired, please log in again"),
        }
    }
}

impl std::error::Error for GatewayError {}

#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, GatewayError>;
}

// =========================================================
// 网关实现
// =========================================================

pub struct AuthGateway<S, T> {
    store: S,
    transport: T,
    refresh_url: String,
}

impl<S: SessionStore, T: HttpTransport> AuthGateway<S, T> {
    pub fn new(store: S, transport: T, refresh_url: String) -> Self {
        Self {
            store,
            transport,
            refresh_url,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 发送请求，透明处理令牌注入与单次刷新重放
    pub async fn send(&self, mut req: HttpRequest) -> Result<HttpResponse, GatewayError> {
        // 1. 注入 Bearer 令牌（仅此一个头，其余请求头原样保留）
        if let Some(token) = self.store.access_token() {
            req.headers.insert(
                HEADER_AUTHORIZATION.to_string(),
                format!("{}{}", BEARER_PREFIX, token),
            );
        }

        let res = self.transport.send(req.clone()).await?;

        // 2. 仅状态码恰为 401 且持有刷新令牌时进入恢复流程
        if res.status != 401 {
            return Ok(res);
        }
        let Some(refresh_token) = self.store.refresh_token() else {
            return Ok(res);
        };

        log::info!("access token rejected, attempting refresh");
        match self.refresh(&refresh_token).await {
            Some(new_token) => {
                // 3a. 持久化新令牌并重放一次；重放结果原样返回，
                //     第二个 401 不再触发刷新
                self.store.set_access_token(&new_token);
                req.headers.insert(
                    HEADER_AUTHORIZATION.to_string(),
                    format!("{}{}", BEARER_PREFIX, new_token),
                );
                self.transport.send(req).await
            }
            None => {
                // 3b. 终态：整体清除会话，调用以 SessionExpired 失败
                log::warn!("token refresh failed, tearing down session");
                self.store.clear();
                Err(GatewayError::SessionExpired)
            }
        }
    }

    /// 向后端换取新的访问令牌；任何失败（网络、非 2xx、解析）都视为刷新失败
    async fn refresh(&self, refresh_token: &str) -> Option<String> {
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })
        .ok()?;
        let req = HttpRequest::new(&self.refresh_url, HttpMethod::Post).with_json(body);
        let res = self.transport.send(req).await.ok()?;
        if !res.ok() {
            return None;
        }
        res.json::<RefreshResponse>().ok().map(|r| r.token)
    }
}

// =========================================================
// 测试工具: MockTransport
// =========================================================

/// 按 URL 排队应答的内存传输层，并记录全部出站请求
#[cfg(test)]
pub struct MockTransport {
    // URL -> 按序弹出的 (Status, Body) 队列
    responses: RefCell<HashMap<String, VecDeque<(u16, String)>>>,
    // 记录发出的请求 (URL, Method, Headers, Body)
    pub requests: RefCell<Vec<(String, String, HashMap<String, String>, Option<String>)>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn enqueue_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back((status, body.to_string()));
    }

    pub fn requests_to(&self, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|(u, _, _, _)| u == url)
            .count()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, GatewayError> {
        self.requests.borrow_mut().push((
            req.url.clone(),
            req.method.as_str().to_string(),
            req.headers.clone(),
            req.body.clone(),
        ));

        let mut responses = self.responses.borrow_mut();
        match responses.get_mut(&req.url).and_then(|q| q.pop_front()) {
            Some((status, body)) => Ok(HttpResponse { status, body }),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
