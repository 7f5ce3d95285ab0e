//! Drop-off Label Server - 送修登记标签打印服务
//!
//! # 架构概述
//!
//! 接收前台表单提交的送修信息 (整车或零件)，生成一张或多张标签并发送到本地
//! 标签打印机。
//!
//! ```text
//! POST /print-label
//!   → labels::validate     必填字段检查
//!   → labels::compose      纯函数: 提交 → 标签列表
//!   → printing::PrintDispatcher::submit   每张标签一个后台任务，不等待结果
//!   → 200 "<N> label(s) being processed for printing."
//! ```
//!
//! # 模块结构
//!
//! ```text
//! label-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── labels/        # 提交、校验、标签组合
//! ├── printing/      # 渲染、打印后端、分发
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间
//! ```

pub mod api;
pub mod core;
pub mod labels;
pub mod printing;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use labels::{LabelDocument, Submission, compose, validate};
pub use printing::{PrintDispatcher, PrintJob};

// Re-export logger functions
pub use utils::logger::init_logger;

pub fn print_banner() {
    println!(
        r#"
    ____                          ________
   / __ \_________  ____         / __/ __/
  / / / / ___/ __ \/ __ \______ / /_/ /_
 / /_/ / /  / /_/ / /_/ /_____// __/ __/
/_____/_/   \____/ .___/      /_/ /_/
    __          /_/__         __
   / /   ____ _/ /_  ___  / /____
  / /   / __ `/ __ \/ _ \/ / ___/
 / /___/ /_/ / /_/ /  __/ (__  )
/_____/\__,_/_.___/\___/_/____/
    "#
    );
}
