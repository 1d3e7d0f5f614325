//! 编译期配置
//!
//! 所有外部端点均在编译时注入，本地开发使用默认值。

/// 后端 API 基地址
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// Cloudinary 云名称（非签名直传）
pub const CLOUDINARY_CLOUD_NAME: &str = match option_env!("CLOUDINARY_CLOUD_NAME") {
    Some(name) => name,
    None => "bluecart-dev",
};

/// Cloudinary 非签名上传预设
pub const CLOUDINARY_UPLOAD_PRESET: &str = match option_env!("CLOUDINARY_UPLOAD_PRESET") {
    Some(preset) => preset,
    None => "bluecart_unsigned",
};
