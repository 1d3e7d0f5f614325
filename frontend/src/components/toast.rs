//! 全局通知模块
//!
//! 跨页面共享的通知信号：任何组件通过 `use_notifier()` 推送
//! 成功/失败消息，`ToastHost` 负责渲染并在 3 秒后自动消失。

use crate::web::timer;
use leptos::prelude::*;

/// 通知句柄 (消息内容, 是否出错)
#[derive(Clone, Copy)]
pub struct Notifier {
    notification: ReadSignal<Option<(String, bool)>>,
    set_notification: WriteSignal<Option<(String, bool)>>,
}

impl Notifier {
    pub fn new() -> Self {
        let (notification, set_notification) = signal(None);
        Self {
            notification,
            set_notification,
        }
    }

    pub fn success(&self, msg: impl Into<String>) {
        self.set_notification.set(Some((msg.into(), false)));
    }

    pub fn error(&self, msg: impl Into<String>) {
        self.set_notification.set(Some((msg.into(), true)));
    }
}

/// 从 Context 获取通知句柄
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

/// 通知渲染组件，应在 App 根部挂载一次
#[component]
pub fn ToastHost() -> impl IntoView {
    let notifier = use_notifier();
    let notification = notifier.notification;
    let set_notification = notifier.set_notification;

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            timer::set_timeout(3_000, move || set_notification.set(None));
        }
    });

    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let (_, is_err) = notification.get().unwrap();
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notification.get().unwrap().0}</span>
                </div>
            </div>
        </Show>
    }
}
