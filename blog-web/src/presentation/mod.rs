use std::sync::Arc;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
use crate::data::repositories::sqlite::user_repository::SqliteUserRepository;
use crate::infrastructure::database::{Database, RequestDb};
use crate::infrastructure::session::SessionTokens;
use crate::infrastructure::settings::Settings;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;
pub(crate) mod views;

pub(crate) const LOGIN_PATH: &str = "/auth/login";
pub(crate) const INDEX_PATH: &str = "/";

#[derive(Clone)]
pub struct AppState {
    pub(crate) database: Database,
    pub(crate) sessions: Arc<SessionTokens>,
}

impl AppState {
    pub fn new(database: Database, settings: &Settings) -> Self {
        Self {
            database,
            sessions: Arc::new(SessionTokens::new(
                &settings.session_secret,
                settings.session_ttl_seconds,
                settings.session_cookie_secure,
            )),
        }
    }

    pub(crate) fn auth_service(&self, db: &RequestDb) -> AuthService<SqliteUserRepository> {
        AuthService::new(SqliteUserRepository::new(db.clone()), self.sessions.clone())
    }

    pub(crate) fn blog_service(&self, db: &RequestDb) -> BlogService<SqlitePostRepository> {
        BlogService::new(SqlitePostRepository::new(db.clone()))
    }
}

/// 302, the status form posts are answered with.
pub(crate) fn redirect_found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
