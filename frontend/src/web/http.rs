//! HTTP 传输层模块
//!
//! 基于 `web_sys::fetch` 实现网关的 `HttpTransport` 接口。
//! 浏览器相关的转换（Headers、RequestInit、Promise）全部收拢在此，
//! 网关与 API 层只面对平台无关的请求/响应类型。

use crate::gateway::{GatewayError, HttpRequest, HttpResponse, HttpTransport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

fn js_err(e: JsValue) -> GatewayError {
    GatewayError::Network(format!("{:?}", e))
}

/// 把 fetch 的响应读成平台无关的 `HttpResponse`
async fn read_response(resp_value: JsValue) -> Result<HttpResponse, GatewayError> {
    let response: Response = resp_value.dyn_into().map_err(js_err)?;
    let status = response.status();

    let text_promise = response.text().map_err(js_err)?;
    let text = JsFuture::from(text_promise).await.map_err(js_err)?;

    Ok(HttpResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}

async fn fetch_with_init(url: &str, opts: &RequestInit) -> Result<HttpResponse, GatewayError> {
    let request = Request::new_with_str_and_init(url, opts).map_err(js_err)?;
    let window = web_sys::window()
        .ok_or_else(|| GatewayError::Network("window object unavailable".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    read_response(resp_value).await
}

/// 浏览器 fetch 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let headers = Headers::new().map_err(js_err)?;
        for (key, value) in &req.headers {
            headers.set(key, value).map_err(js_err)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        fetch_with_init(&req.url, &opts).await
    }
}

/// POST 一个 multipart 表单（浏览器自动设置 Content-Type 边界）
///
/// 用于不经网关的匿名上传接口。
pub async fn post_form(url: &str, form: &web_sys::FormData) -> Result<HttpResponse, GatewayError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form.as_ref());

    fetch_with_init(url, &opts).await
}
