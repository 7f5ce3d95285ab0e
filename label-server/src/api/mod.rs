//! API 路由模块
//!
//! # 结构
//!
//! - [`print_label`] - 标签打印接口
//! - [`health`] - 健康检查

pub mod health;
pub mod print_label;

use axum::Router;
use http::{HeaderName, HeaderValue, Request};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// UUID v4 per request, echoed back in `x-request-id`
#[derive(Clone, Copy, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(print_label::router())
        .merge(health::router())
}

/// The application served over HTTP (and driven in-process by tests)
pub fn router(state: ServerState) -> Router {
    // Top of the stack runs first
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, UuidRequestId))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        // The intake form is served from another origin
        .layer(CorsLayer::permissive());

    build_router().layer(middleware).with_state(state)
}
