use axum::{Json, Router, middleware, routing::get};
use serde::Serialize;

use super::middleware::context::request_context;
use super::{AppState, routes};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/hello", get(hello_handler))
        .merge(
            routes::router().layer(middleware::from_fn_with_state(
                state.clone(),
                request_context,
            )),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn hello_handler() -> &'static str {
    "Hello World"
}
