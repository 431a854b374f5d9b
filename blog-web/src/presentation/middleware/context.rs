use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::domain::session::Session;
use crate::domain::user::User;
use crate::infrastructure::database::RequestDb;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, ErrorPage};

/// Everything a handler knows about the request beyond its parameters.
#[derive(Clone)]
pub(crate) struct RequestContext {
    pub(crate) db: RequestDb,
    pub(crate) session: Session,
    pub(crate) user: Option<User>,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow!("request context middleware is not installed")))
    }
}

/// Resolves the session cookie to the current user, runs the request, then
/// closes the request's connection if one was opened. Error pages are
/// rendered again with the user's navigation.
pub(crate) async fn request_context(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = state.sessions.read(&jar);
    let db = RequestDb::new(state.database.clone());

    let response = match state.auth_service(&db).current_user(&session).await {
        Ok(user) => {
            request.extensions_mut().insert(RequestContext {
                db: db.clone(),
                session,
                user: user.clone(),
            });
            let response = next.run(request).await;
            let page = response.extensions().get::<ErrorPage>().cloned();
            match (user, page) {
                (Some(user), Some(page)) => page.render(Some(&user)),
                _ => response,
            }
        }
        Err(err) => AppError::from(err).into_response(),
    };

    if let Err(err) = db.close().await {
        warn!(error = %err, "failed to close request connection");
    }
    response
}
