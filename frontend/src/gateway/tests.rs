use super::*;
use crate::session::{MockSessionStore, Session, SessionStore};
use bluecart_shared::Role;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

const REFRESH_URL: &str = "http://api.test/api/auth/refresh";
const TARGET_URL: &str = "http://api.test/api/orders/seller";

fn test_session() -> Session {
    Session {
        token: "t1".to_string(),
        refresh_token: "r1".to_string(),
        role: Role::Seller,
        user_id: "42".to_string(),
    }
}

fn gateway_with_session() -> AuthGateway<MockSessionStore, MockTransport> {
    AuthGateway::new(
        MockSessionStore::with_session(&test_session()),
        MockTransport::new(),
        REFRESH_URL.to_string(),
    )
}

fn get_request() -> HttpRequest {
    HttpRequest::new(TARGET_URL, HttpMethod::Get)
}

// =========================================================
// 令牌注入
// =========================================================

#[tokio::test]
async fn test_attaches_single_bearer_header() {
    let gw = gateway_with_session();
    gw.transport()
        .enqueue_response(TARGET_URL, 200, json!([]));

    let res = gw
        .send(get_request().with_header("X-Custom", "kept"))
        .await
        .unwrap();
    assert_eq!(res.status, 200);

    let requests = gw.transport().requests.borrow();
    let (_, method, headers, _) = &requests[0];
    assert_eq!(method, "GET");
    // 恰好一个 Authorization 头，值为 Bearer <token>
    assert_eq!(headers.get("Authorization").unwrap(), "Bearer t1");
    // 其余请求头不受影响
    assert_eq!(headers.get("X-Custom").unwrap(), "kept");
    assert_eq!(headers.len(), 2);
}

#[tokio::test]
async fn test_no_token_sends_no_auth_header() {
    let gw = AuthGateway::new(
        MockSessionStore::new(),
        MockTransport::new(),
        REFRESH_URL.to_string(),
    );
    gw.transport().enqueue_response(TARGET_URL, 200, json!([]));

    gw.send(get_request()).await.unwrap();

    let requests = gw.transport().requests.borrow();
    assert!(!requests[0].2.contains_key("Authorization"));
}

#[tokio::test]
async fn test_login_then_request_carries_token() {
    // 场景：登录写入四个字段后，后续网关调用自动携带 Bearer 令牌
    let gw = AuthGateway::new(
        MockSessionStore::new(),
        MockTransport::new(),
        REFRESH_URL.to_string(),
    );
    gw.store().save(&test_session());
    assert!(gw.store().load().is_some());

    gw.transport().enqueue_response(TARGET_URL, 200, json!([]));
    gw.send(get_request()).await.unwrap();

    let requests = gw.transport().requests.borrow();
    assert_eq!(requests[0].2.get("Authorization").unwrap(), "Bearer t1");
}

// =========================================================
// 401 刷新与重放
// =========================================================

#[tokio::test]
async fn test_refresh_then_replays_exactly_once() {
    let gw = gateway_with_session();
    gw.transport().enqueue_response(TARGET_URL, 401, json!({}));
    gw.transport()
        .enqueue_response(TARGET_URL, 200, json!({"ok": true}));
    gw.transport()
        .enqueue_response(REFRESH_URL, 200, json!({"token": "t2"}));

    let res = gw.send(get_request()).await.unwrap();
    assert_eq!(res.status, 200);

    // 原请求、刷新、重放，共三次
    assert_eq!(gw.transport().requests.borrow().len(), 3);
    assert_eq!(gw.transport().requests_to(REFRESH_URL), 1);

    // 重放携带新令牌，且新令牌已持久化
    let requests = gw.transport().requests.borrow();
    let (_, _, replay_headers, _) = requests.last().unwrap();
    assert_eq!(replay_headers.get("Authorization").unwrap(), "Bearer t2");
    assert_eq!(gw.store().access_token().unwrap(), "t2");
}

#[tokio::test]
async fn test_refresh_body_carries_refresh_token() {
    let gw = gateway_with_session();
    gw.transport().enqueue_response(TARGET_URL, 401, json!({}));
    gw.transport().enqueue_response(TARGET_URL, 200, json!({}));
    gw.transport()
        .enqueue_response(REFRESH_URL, 200, json!({"token": "t2"}));

    gw.send(get_request()).await.unwrap();

    let requests = gw.transport().requests.borrow();
    let (_, method, _, body) = requests
        .iter()
        .find(|(u, _, _, _)| u == REFRESH_URL)
        .unwrap();
    assert_eq!(method, "POST");
    let body: serde_json::Value = serde_json::from_str(body.as_ref().unwrap()).unwrap();
    assert_eq!(body["refreshToken"], "r1");
}

#[tokio::test]
async fn test_second_401_does_not_refresh_again() {
    let gw = gateway_with_session();
    gw.transport().enqueue_response(TARGET_URL, 401, json!({}));
    gw.transport().enqueue_response(TARGET_URL, 401, json!({}));
    gw.transport()
        .enqueue_response(REFRESH_URL, 200, json!({"token": "t2"}));

    // 重放仍是 401：原样返回，不做第二次刷新
    let res = gw.send(get_request()).await.unwrap();
    assert_eq!(res.status, 401);
    assert_eq!(gw.transport().requests_to(REFRESH_URL), 1);
}

#[tokio::test]
async fn test_refresh_failure_clears_store_and_fails_terminally() {
    let gw = gateway_with_session();
    gw.transport().enqueue_response(TARGET_URL, 401, json!({}));
    gw.transport()
        .enqueue_response(REFRESH_URL, 403, json!({"error": "revoked"}));

    let err = gw.send(get_request()).await.unwrap_err();
    assert_eq!(err, GatewayError::SessionExpired);

    // 四个键全部清除
    assert!(gw.store().is_empty());
    assert!(gw.store().load().is_none());
    assert!(gw.store().access_token().is_none());
    assert!(gw.store().refresh_token().is_none());
}

#[tokio::test]
async fn test_401_without_refresh_token_returned_as_is() {
    let store = MockSessionStore::new();
    store.set_access_token("stale");
    let gw = AuthGateway::new(store, MockTransport::new(), REFRESH_URL.to_string());
    gw.transport().enqueue_response(TARGET_URL, 401, json!({}));

    let res = gw.send(get_request()).await.unwrap();
    assert_eq!(res.status, 401);
    assert_eq!(gw.transport().requests_to(REFRESH_URL), 0);
}

#[tokio::test]
async fn test_non_401_error_passes_through_unmodified() {
    let gw = gateway_with_session();
    gw.transport()
        .enqueue_response(TARGET_URL, 500, json!({"error": "boom"}));

    let res = gw.send(get_request()).await.unwrap();
    assert_eq!(res.status, 500);
    assert!(!res.ok());
    assert_eq!(gw.transport().requests_to(REFRESH_URL), 0);
    // 会话保持原样
    assert_eq!(gw.store().access_token().unwrap(), "t1");
}
