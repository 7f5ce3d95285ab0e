//! 工具模块 - 日志和时间格式化

pub mod logger;
pub mod time;
