//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由及其守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页 (默认路由)
    #[default]
    Login,
    /// 注册页
    Register,
    /// 店面首页（按角色渲染买家/卖家视图，需要认证）
    Home,
    /// 卖家创建商品
    CreateProduct,
    /// 卖家编辑商品（携带商品 id）
    EditProduct(u64),
    /// 买家支付页
    Payment,
    /// 卖家销售页
    Sales,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/register" => Self::Register,
            "/home" => Self::Home,
            "/create-product" => Self::CreateProduct,
            "/payment" => Self::Payment,
            "/sales" => Self::Sales,
            _ => {
                if let Some(id) = path
                    .strip_prefix("/edit-product/")
                    .and_then(|id| id.parse::<u64>().ok())
                {
                    Self::EditProduct(id)
                } else {
                    Self::NotFound
                }
            }
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Register => "/register".to_string(),
            Self::Home => "/home".to_string(),
            Self::CreateProduct => "/create-product".to_string(),
            Self::EditProduct(id) => format!("/edit-product/{}", id),
            Self::Payment => "/payment".to_string(),
            Self::Sales => "/sales".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    ///
    /// 登录/注册页自身在加载时清除会话，因此不做"已认证则跳走"的反向守卫。
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Register | Self::NotFound)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_round_trip() {
        for route in [
            AppRoute::Register,
            AppRoute::Home,
            AppRoute::CreateProduct,
            AppRoute::EditProduct(42),
            AppRoute::Payment,
            AppRoute::Sales,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_login_aliases() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
    }

    #[test]
    fn test_edit_product_requires_numeric_id() {
        assert_eq!(
            AppRoute::from_path("/edit-product/7"),
            AppRoute::EditProduct(7)
        );
        assert_eq!(AppRoute::from_path("/edit-product/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/edit-product/"), AppRoute::NotFound);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_auth_guard_covers_store_pages() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Home.requires_auth());
        assert!(AppRoute::CreateProduct.requires_auth());
        assert!(AppRoute::EditProduct(1).requires_auth());
        assert!(AppRoute::Payment.requires_auth());
        assert!(AppRoute::Sales.requires_auth());
    }
}
