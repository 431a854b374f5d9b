use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::blog::{
    create, create_form, delete, index, update, update_form,
};
use crate::presentation::middleware::auth::login_required;

pub(crate) fn router() -> Router<AppState> {
    let public = Router::new().route("/", get(index));

    let protected = Router::new()
        .route("/create", get(create_form).post(create))
        .route("/{id}/update", get(update_form).post(update))
        .route("/{id}/delete", post(delete))
        .route_layer(middleware::from_fn(login_required));

    public.merge(protected)
}
