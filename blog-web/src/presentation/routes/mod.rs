use axum::Router;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod blog;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(blog::router())
}
