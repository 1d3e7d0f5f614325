//! 图片上传模块
//!
//! Cloudinary 非签名直传：把用户选择的文件以 multipart 表单
//! POST 到上传端点，换回可公开访问的 `secure_url`。
//! 上传不经过认证网关（Cloudinary 以 upload preset 鉴权）。

use crate::config;
use crate::web::http::post_form;
use serde::Deserialize;
use web_sys::FormData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// 表单构建或网络失败
    Network(String),
    /// 上传端点拒绝（预设无效、文件超限等）
    Rejected { status: u16, message: String },
    /// 响应缺少 secure_url
    Decode(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Network(msg) => write!(f, "Upload failed: {}", msg),
            UploadError::Rejected { status, .. } => {
                write!(f, "Upload rejected (HTTP {})", status)
            }
            UploadError::Decode(msg) => write!(f, "Unexpected upload response: {}", msg),
        }
    }
}

impl std::error::Error for UploadError {}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

fn upload_url() -> String {
    format!(
        "https://api.cloudinary.com/v1_1/{}/image/upload",
        config::CLOUDINARY_CLOUD_NAME
    )
}

/// 上传一张图片，返回其公开 URL
pub async fn upload_image(file: &web_sys::File) -> Result<String, UploadError> {
    let form = FormData::new().map_err(|e| UploadError::Network(format!("{:?}", e)))?;
    form.append_with_blob("file", file)
        .map_err(|e| UploadError::Network(format!("{:?}", e)))?;
    form.append_with_str("upload_preset", config::CLOUDINARY_UPLOAD_PRESET)
        .map_err(|e| UploadError::Network(format!("{:?}", e)))?;

    let res = post_form(&upload_url(), &form)
        .await
        .map_err(|e| UploadError::Network(e.to_string()))?;

    if !res.ok() {
        log::warn!("image upload rejected with status {}", res.status);
        return Err(UploadError::Rejected {
            status: res.status,
            message: res.body,
        });
    }

    res.json::<UploadResponse>()
        .map(|r| r.secure_url)
        .map_err(|e| UploadError::Decode(e.to_string()))
}
