//! 会话存储模块 (Token Store)
//!
//! 将浏览器 LocalStorage 中的四个裸字符串键（`token`、`refreshToken`、
//! `role`、`userId`）收拢为一个显式的 `SessionStore` 接口：
//! 读取、整体写入、单独刷新访问令牌、整体清除。
//! 键值为裸字符串而非 JSON，是与既有部署的边界契约，任何键缺失即视为未登录。

use bluecart_shared::Role;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 存储键常量
// =========================================================

pub const KEY_TOKEN: &str = "token";
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
pub const KEY_ROLE: &str = "role";
pub const KEY_USER_ID: &str = "userId";

/// 活跃订单 id（支付页使用，允许缺失）
pub const KEY_ORDER_ID: &str = "orderId";

// =========================================================
// 会话模型
// =========================================================

/// 一份完整的登录会话。每个浏览器上下文至多一份：
/// 登录时整体覆盖，登出/过期时整体清除。
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub refresh_token: String,
    pub role: Role,
    pub user_id: String,
}

// =========================================================
// 存储接口
// =========================================================

/// 会话存储的显式操作集合
///
/// 网关与认证层只依赖该 trait，生产实现走 LocalStorage，
/// 测试实现走内存表。
pub trait SessionStore {
    /// 读取完整会话；任一键缺失或角色非法则返回 None
    fn load(&self) -> Option<Session>;

    /// 整体写入会话（四个键一次性覆盖）
    fn save(&self, session: &Session);

    /// 仅当前访问令牌
    fn access_token(&self) -> Option<String>;

    /// 仅刷新令牌
    fn refresh_token(&self) -> Option<String>;

    /// 刷新成功后单独重写访问令牌
    fn set_access_token(&self, token: &str);

    /// 整体清除（登出、刷新失败、登录/注册页加载时）
    fn clear(&self);
}

// =========================================================
// 实现层: LocalStorage
// =========================================================

/// 基于浏览器 LocalStorage 的生产实现
///
/// 直接走 `web_sys::Storage` 读写裸字符串，不做任何 JSON 包装。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSessionStore;

impl LocalSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 会话键之外的零散键（如 `orderId`）也经由这组裸字符串接口读写
    pub fn get_raw(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn set_raw(key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    pub fn remove_raw(key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Option<Session> {
        let token = Self::get_raw(KEY_TOKEN)?;
        let refresh_token = Self::get_raw(KEY_REFRESH_TOKEN)?;
        let role = Role::parse(&Self::get_raw(KEY_ROLE)?)?;
        let user_id = Self::get_raw(KEY_USER_ID)?;
        Some(Session {
            token,
            refresh_token,
            role,
            user_id,
        })
    }

    fn save(&self, session: &Session) {
        Self::set_raw(KEY_TOKEN, &session.token);
        Self::set_raw(KEY_REFRESH_TOKEN, &session.refresh_token);
        Self::set_raw(KEY_ROLE, session.role.as_str());
        Self::set_raw(KEY_USER_ID, &session.user_id);
    }

    fn access_token(&self) -> Option<String> {
        Self::get_raw(KEY_TOKEN)
    }

    fn refresh_token(&self) -> Option<String> {
        Self::get_raw(KEY_REFRESH_TOKEN)
    }

    fn set_access_token(&self, token: &str) {
        Self::set_raw(KEY_TOKEN, token);
    }

    fn clear(&self) {
        Self::remove_raw(KEY_TOKEN);
        Self::remove_raw(KEY_REFRESH_TOKEN);
        Self::remove_raw(KEY_ROLE);
        Self::remove_raw(KEY_USER_ID);
    }
}

// =========================================================
// 测试工具: MockSessionStore
// =========================================================

/// 内存实现，供网关逻辑的原生测试使用
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockSessionStore {
    values: RefCell<HashMap<&'static str, String>>,
}

#[cfg(test)]
impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        let store = Self::new();
        store.save(session);
        store
    }

    /// 测试断言用：存储中是否还有任何键
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

#[cfg(test)]
impl SessionStore for MockSessionStore {
    fn load(&self) -> Option<Session> {
        let values = self.values.borrow();
        Some(Session {
            token: values.get(KEY_TOKEN)?.clone(),
            refresh_token: values.get(KEY_REFRESH_TOKEN)?.clone(),
            role: Role::parse(values.get(KEY_ROLE)?)?,
            user_id: values.get(KEY_USER_ID)?.clone(),
        })
    }

    fn save(&self, session: &Session) {
        let mut values = self.values.borrow_mut();
        values.insert(KEY_TOKEN, session.token.clone());
        values.insert(KEY_REFRESH_TOKEN, session.refresh_token.clone());
        values.insert(KEY_ROLE, session.role.as_str().to_string());
        values.insert(KEY_USER_ID, session.user_id.clone());
    }

    fn access_token(&self) -> Option<String> {
        self.values.borrow().get(KEY_TOKEN).cloned()
    }

    fn refresh_token(&self) -> Option<String> {
        self.values.borrow().get(KEY_REFRESH_TOKEN).cloned()
    }

    fn set_access_token(&self, token: &str) {
        self.values
            .borrow_mut()
            .insert(KEY_TOKEN, token.to_string());
    }

    fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}
