//! BlueCart 共享协议层
//!
//! 前端与后端 HTTP 契约的共享定义：
//! - `protocol`: 线上传输的领域模型（serde camelCase）
//! - `date`: 毫秒时间戳类型与解析

pub mod date;
pub mod protocol;

pub use date::Timestamp;
pub use protocol::*;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 认证请求头名称
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Bearer Token 前缀（含空格）
pub const BEARER_PREFIX: &str = "Bearer ";
