//! 时间类型模块
//!
//! 提供 `Timestamp`：可序列化的毫秒时间戳，用于传输、存储与倒计时计算。
//! 后端以字符串形式下发到期时间（RFC 3339 或无时区的 ISO 形式），
//! 解析统一走 `Timestamp::parse`。

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::time::Duration;

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 创建新的时间戳
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 获取毫秒值
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 获取秒值
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0 / 1000
    }

    /// 解析后端下发的到期时间字符串
    ///
    /// 依次尝试：
    /// 1. RFC 3339（带时区偏移，如 `2025-07-07T10:00:00Z`）
    /// 2. 无时区的 ISO 形式（如 `2025-07-07T10:00:00.123`），按 UTC 处理
    ///
    /// 返回 None 如果两种形式都解析失败
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.timestamp_millis()));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| Self(naive.and_utc().timestamp_millis()))
    }

    /// 计算 `self - earlier` 的有符号毫秒差（可为负）
    #[inline]
    pub const fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_millis() as i64)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// 计算两个时间戳之间的差值（饱和为零，返回 Duration）
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = (self.0 - rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_utc() {
        let ts = Timestamp::parse("1970-01-01T00:01:30Z").unwrap();
        assert_eq!(ts.as_millis(), 90_000);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = Timestamp::parse("1970-01-01T01:00:00+01:00").unwrap();
        assert_eq!(ts.as_millis(), 0);
    }

    #[test]
    fn test_parse_naive_treated_as_utc() {
        let ts = Timestamp::parse("1970-01-01T00:00:01.500").unwrap();
        assert_eq!(ts.as_millis(), 1_500);
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        assert!(Timestamp::parse("not a date").is_none());
        assert!(Timestamp::parse("").is_none());
    }

    #[test]
    fn test_millis_since_can_be_negative() {
        let past = Timestamp::new(1_000);
        let now = Timestamp::new(5_000);
        assert_eq!(past.millis_since(now), -4_000);
        assert_eq!(now.millis_since(past), 4_000);
    }

    #[test]
    fn test_sub_saturates_to_zero() {
        let past = Timestamp::new(1_000);
        let now = Timestamp::new(5_000);
        assert_eq!(past - now, Duration::ZERO);
        assert_eq!(now - past, Duration::from_secs(4));
    }
}
