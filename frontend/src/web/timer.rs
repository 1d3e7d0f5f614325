//! 定时器封装模块
//!
//! 封装 `setInterval` / `setTimeout` 原生 API。
//! 句柄被 drop 时自动清除，组件卸载即停表。

use wasm_bindgen::prelude::*;

/// 周期性定时器，drop 即取消
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

// wasm32 is single-threaded; these impls let the handle satisfy the
// `Send + Sync` bounds of `leptos::prelude::on_cleanup`.
unsafe impl Send for Interval {}
unsafe impl Sync for Interval {}

impl Interval {
    /// # Panics
    /// 无法获取 window 对象或注册定时器失败时 panic
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let window = web_sys::window().expect("window object unavailable");

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .expect("setInterval failed");

        Self { handle, closure }
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 一次性定时器。与 `Interval` 不同，触发后闭包即完成使命，
/// 因此直接 forget，调用方无需持有句柄。
pub fn set_timeout<F>(millis: u32, callback: F)
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once(callback);
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis as i32,
        );
    }
    closure.forget();
}
