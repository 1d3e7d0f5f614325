//! 线上协议模块 - 领域模型
//!
//! 与后端 HTTP 契约一一对应的传输类型。字段统一 camelCase，
//! 枚举按后端实际下发的形式序列化（角色/订单状态大写，计时器类型小写）。

use serde::{Deserialize, Serialize};

// =========================================================
// 枚举 (Enums)
// =========================================================

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Seller => "SELLER",
        }
    }

    /// 宽容解析：忽略大小写，未知值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BUYER" => Some(Role::Buyer),
            "SELLER" => Some(Role::Seller),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// 订单计时器类型：支付倒计时、发货倒计时或无
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerType {
    Payment,
    Shipment,
    #[default]
    None,
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub role: Role,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// =========================================================
// 商品 (Products)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub price: i64,
    pub description: String,
    pub image_url: String,
    pub quantity: u32,
}

/// 创建/更新商品的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub category: String,
    pub price: i64,
    pub description: String,
    pub image_url: String,
    pub quantity: u32,
}

// =========================================================
// 购物车 (Cart)
// =========================================================

/// 购物车条目中内嵌的商品摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: u64,
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub product: CartProduct,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub quantity: u32,
}

// =========================================================
// 订单与计时 (Orders & Timing)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_title: String,
    pub unit_price: i64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// 订单。卖家列表接口与 checkout 接口对 id 字段命名不一致
/// （`orderId` 或 `id`），用 alias 兼容两种形式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "id")]
    pub order_id: u64,
    pub status: OrderStatus,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub items: Vec<OrderItem>,
}

/// 每单计时信息，由后端按需下发；不在视图生命周期之外缓存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingInfo {
    pub order_id: u64,
    pub status: OrderStatus,
    pub expires_at: String,
    #[serde(default)]
    pub seconds_remaining: i64,
    pub timer_type: TimerType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format_is_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Buyer).unwrap(), "\"BUYER\"");
        let r: Role = serde_json::from_str("\"SELLER\"").unwrap();
        assert_eq!(r, Role::Seller);
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("buyer"), Some(Role::Buyer));
        assert_eq!(Role::parse("Seller"), Some(Role::Seller));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_timer_type_wire_format_is_lowercase() {
        let t: TimerType = serde_json::from_str("\"payment\"").unwrap();
        assert_eq!(t, TimerType::Payment);
        let t: TimerType = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(t, TimerType::None);
    }

    #[test]
    fn test_order_accepts_order_id_or_id() {
        let a: Order = serde_json::from_str(
            r#"{"orderId": 7, "status": "PAID", "expiresAt": "2025-01-01T00:00:00Z", "items": []}"#,
        )
        .unwrap();
        assert_eq!(a.order_id, 7);

        let b: Order =
            serde_json::from_str(r#"{"id": 9, "status": "PENDING", "items": []}"#).unwrap();
        assert_eq!(b.order_id, 9);
        assert!(b.expires_at.is_none());
    }

    #[test]
    fn test_timing_info_decodes_backend_shape() {
        let t: TimingInfo = serde_json::from_str(
            r#"{"orderId": 3, "status": "PENDING", "expiresAt": "2025-07-07T10:00:00",
                "secondsRemaining": 120, "timerType": "payment"}"#,
        )
        .unwrap();
        assert_eq!(t.order_id, 3);
        assert_eq!(t.timer_type, TimerType::Payment);
        assert_eq!(t.seconds_remaining, 120);
    }

    #[test]
    fn test_register_request_omits_absent_optionals() {
        let req = RegisterRequest {
            username: "alice".into(),
            password: "pw".into(),
            role: Role::Buyer,
            national_id: None,
            profile_image_url: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("nationalId"));
        assert!(!json.contains("profileImageUrl"));
    }
}
