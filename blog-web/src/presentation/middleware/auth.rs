use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::domain::user::User;
use crate::presentation::app_error::AppError;
use crate::presentation::middleware::context::RequestContext;
use crate::presentation::{LOGIN_PATH, redirect_found};

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser(pub(crate) User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .and_then(|ctx| ctx.user.clone())
            .map(AuthenticatedUser)
            .ok_or(AppError::LoginRequired)
    }
}

/// Guards a router: anonymous requests are sent to the login page before any
/// handler or body extractor runs.
pub(crate) async fn login_required(request: Request, next: Next) -> Response {
    let logged_in = request
        .extensions()
        .get::<RequestContext>()
        .is_some_and(|ctx| ctx.user.is_some());

    if !logged_in {
        return redirect_found(LOGIN_PATH);
    }
    next.run(request).await
}
