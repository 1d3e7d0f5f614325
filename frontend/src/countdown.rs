//! 订单倒计时模块
//!
//! 把服务端下发的到期时间换算为人类可读的剩余时间字符串。
//! 纯函数、以显式的 `now` 为输入，视图层用每秒一跳的 Interval
//! 驱动 `now` 信号即可获得持续刷新的倒计时。

use bluecart_shared::{TimerType, Timestamp, TimingInfo};

/// 倒计时刷新间隔（毫秒）
pub const TICK_MS: u32 = 1_000;

/// 获取当前毫秒时间戳
pub fn now() -> Timestamp {
    Timestamp::new(js_sys::Date::now() as i64)
}

/// 将剩余时间格式化为 `"<m>m <s>s"`；已到期（含恰好到期）显示 `"Expired"`。
///
/// 分秒均为整数截断，分钟为零时也保留两段（如 `"0m 5s"`），
/// 永远不会出现负数。
pub fn format_remaining(expires_at: Timestamp, now: Timestamp) -> String {
    let ms = expires_at.millis_since(now);
    if ms <= 0 {
        return "Expired".to_string();
    }
    let mins = ms / 60_000;
    let secs = (ms % 60_000) / 1_000;
    format!("{}m {}s", mins, secs)
}

/// 按展示策略计算某单的倒计时文案
///
/// - `timer_type == none`：不渲染任何倒计时，返回 None；
/// - 到期时间无法解析：同样不渲染（而不是显示坏数据）；
/// - 其余情况返回格式化后的剩余时间。
pub fn countdown_label(timing: &TimingInfo, now: Timestamp) -> Option<String> {
    if timing.timer_type == TimerType::None {
        return None;
    }
    let expires_at = Timestamp::parse(&timing.expires_at)?;
    Some(format_remaining(expires_at, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluecart_shared::OrderStatus;

    fn timing(timer_type: TimerType, expires_at: &str) -> TimingInfo {
        TimingInfo {
            order_id: 1,
            status: OrderStatus::Pending,
            expires_at: expires_at.to_string(),
            seconds_remaining: 0,
            timer_type,
        }
    }

    #[test]
    fn test_past_expiry_renders_expired() {
        let now = Timestamp::new(100_000);
        assert_eq!(format_remaining(Timestamp::new(99_999), now), "Expired");
        assert_eq!(format_remaining(Timestamp::new(0), now), "Expired");
        // 恰好到期也是 Expired，绝不出现负数
        assert_eq!(format_remaining(now, now), "Expired");
    }

    #[test]
    fn test_90_seconds_renders_1m_30s() {
        let now = Timestamp::new(0);
        assert_eq!(format_remaining(Timestamp::new(90_000), now), "1m 30s");
    }

    #[test]
    fn test_sub_minute_keeps_both_components() {
        let now = Timestamp::new(0);
        assert_eq!(format_remaining(Timestamp::new(5_000), now), "0m 5s");
        assert_eq!(format_remaining(Timestamp::new(61_000), now), "1m 1s");
    }

    #[test]
    fn test_truncates_partial_seconds() {
        let now = Timestamp::new(0);
        // 89.9 秒 -> 1m 29s（整数截断，不做四舍五入）
        assert_eq!(format_remaining(Timestamp::new(89_900), now), "1m 29s");
    }

    #[test]
    fn test_timer_type_none_renders_nothing() {
        let t = timing(TimerType::None, "1970-01-01T00:10:00Z");
        assert_eq!(countdown_label(&t, Timestamp::new(0)), None);
    }

    #[test]
    fn test_payment_timer_renders_countdown() {
        let t = timing(TimerType::Payment, "1970-01-01T00:01:30Z");
        assert_eq!(
            countdown_label(&t, Timestamp::new(0)),
            Some("1m 30s".to_string())
        );
    }

    #[test]
    fn test_shipment_timer_past_expiry() {
        let t = timing(TimerType::Shipment, "1970-01-01T00:00:00Z");
        assert_eq!(
            countdown_label(&t, Timestamp::new(60_000)),
            Some("Expired".to_string())
        );
    }

    #[test]
    fn test_unparsable_expiry_renders_nothing() {
        let t = timing(TimerType::Payment, "garbage");
        assert_eq!(countdown_label(&t, Timestamp::new(0)), None);
    }
}
