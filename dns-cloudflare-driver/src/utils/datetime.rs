//! 时间戳工具
//!
//! The legacy API reports times as Unix timestamps (integer, float or numeric
//! string). Operations hand them back as `ctime`-style text, e.g.
//! `"Thu Jan  1 00:00:00 1970"`, rendered in UTC.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// `ctime(3)` layout: weekday, month, space-padded day, time, year.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// 从 JSON 值中提取 Unix 时间戳（秒）
///
/// 支持整数、浮点数（截断小数部分）以及数字字符串。
#[allow(clippy::cast_possible_truncation)]
pub fn timestamp_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// 将 Unix 时间戳转换为 `DateTime<Utc>`
pub fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// 格式化为 ctime 风格字符串
pub fn format_ctime(dt: &DateTime<Utc>) -> String {
    dt.format(CTIME_FORMAT).to_string()
}

/// 将 JSON 时间戳直接转换为 ctime 风格字符串
pub fn ctime_from_value(value: &Value) -> Option<String> {
    timestamp_from_value(value)
        .and_then(from_unix)
        .map(|dt| format_ctime(&dt))
}
