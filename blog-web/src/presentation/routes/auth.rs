use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{login, login_form, logout, register, register_form};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}
