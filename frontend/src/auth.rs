//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//! LocalStorage 中的会话是事实来源，内存信号只是它的镜像。

use crate::api::{Api, ApiError};
use crate::session::{LocalSessionStore, Session, SessionStore};
use bluecart_shared::{LoginRequest, LoginResponse, RegisterRequest, Role};
use leptos::prelude::*;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 当前会话（仅在认证成功后存在）
    pub session: Option<Session>,
    /// 是否正在加载
    pub is_loading: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            session: None,
            is_loading: true,
        });
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().session.is_some())
    }

    /// 当前角色；未登录时为 None
    pub fn role(&self) -> Option<Role> {
        self.state.get().session.map(|s| s.role)
    }

    /// 当前用户 id；未登录时为 None
    pub fn user_id(&self) -> Option<String> {
        self.state.get().session.map(|s| s.user_id)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：从 LocalStorage 恢复会话镜像
///
/// 不向后端验证令牌有效性，过期令牌会在第一次请求时
/// 由网关的刷新流程兜底。
pub fn init_auth(ctx: &AuthContext) {
    let session = LocalSessionStore.load();
    ctx.set_state.update(|state| {
        state.session = session;
        state.is_loading = false;
    });
}

/// 登录：换取令牌、持久化四个会话键并更新内存状态
pub async fn login(
    ctx: &AuthContext,
    username: String,
    password: String,
) -> Result<Role, ApiError> {
    let api = Api::new();
    let LoginResponse {
        token,
        refresh_token,
        role,
        user_id,
    } = api.login(&LoginRequest { username, password }).await?;

    let session = Session {
        token,
        refresh_token,
        role,
        user_id: user_id.to_string(),
    };
    LocalSessionStore.save(&session);

    ctx.set_state.update(|state| {
        state.session = Some(session);
    });
    log::info!("logged in as {}", role);
    Ok(role)
}

/// 注册新账号；成功后不自动登录，由调用方引导回登录页
pub async fn register(req: &RegisterRequest) -> Result<(), ApiError> {
    Api::new().register(req).await
}

/// 注销并清除状态
///
/// 先尽力通知后端吊销刷新令牌（失败不阻塞登出），
/// 再整体清除本地会话。导航由路由服务的认证监听自动处理。
pub async fn logout(ctx: &AuthContext) {
    let store = LocalSessionStore;
    if let Some(refresh_token) = store.refresh_token() {
        if let Err(e) = Api::new().logout(&refresh_token).await {
            log::warn!("logout request failed: {}", e);
        }
    }
    force_logout(ctx);
}

/// 本地登出：清除会话存储与内存状态，不访问后端
///
/// 会话过期（`ApiError::SessionExpired`）时也走这里，
/// 此时存储已被网关清除，再清一次是幂等的。
pub fn force_logout(ctx: &AuthContext) {
    LocalSessionStore.clear();
    ctx.set_state.update(|state| {
        state.session = None;
    });
}
