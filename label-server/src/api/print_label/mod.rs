//! Print Label API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /print-label | POST | 提交送修信息，打印标签 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::PrintLabelResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/print-label", post(handler::print_label))
}
