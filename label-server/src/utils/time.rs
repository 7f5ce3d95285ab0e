//! 时间工具函数 - 标签时间戳

use chrono::{DateTime, TimeZone};

/// 标签上的提交时间 (`M/D/YYYY, h:mm:ss AM`)
///
/// 每个请求只取一次，同一批标签共用
pub fn format_submitted_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
