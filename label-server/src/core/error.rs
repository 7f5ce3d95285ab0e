use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::labels::ValidationError;
use crate::printing::DispatchError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("验证错误: {0}")]
    Validation(#[from] ValidationError),

    #[error("打印分发失败: {0}")]
    Dispatch(#[from] DispatchError),
}

/// 错误响应体 `{ "error": "..." }`
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ServerError::Validation(e) => {
                tracing::warn!(error = %e, "Invalid data received");
                (StatusCode::BAD_REQUEST, "Invalid data received.")
            }
            ServerError::Dispatch(e) => {
                // 记录内部错误但不暴露详细信息
                tracing::error!(error = %e, "Failed to dispatch print jobs");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to print.")
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// 处理器的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
