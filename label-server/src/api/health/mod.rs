//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 简单健康检查 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "ok",
//!   "version": "0.1.0",
//!   "printer": "D450 Printer",
//!   "backend": "spool",
//!   "target": "spool D450 Printer"
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 简单健康检查响应
///
/// 不探测打印机状态；打印结果只记录在日志中
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 状态 (ok)
    pub status: String,
    /// 版本号
    pub version: String,
    /// 配置的打印机名称
    pub printer: String,
    /// 打印后端
    pub backend: String,
    /// 实际打印目标
    pub target: String,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let printer = &state.config().printer;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        printer: printer.name.clone(),
        backend: printer.backend.to_string(),
        target: state.dispatcher().target(),
    })
}
