use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::presentation::views::error_page;
use crate::presentation::{LOGIN_PATH, redirect_found};

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Form(#[from] FormRejection),

    #[error("login required")]
    LoginRequired,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

/// Recoverable errors become the flash message for the re-rendered form;
/// everything else propagates as an error response.
pub(crate) fn flash_message(err: DomainError) -> AppResult<String> {
    if err.is_recoverable() {
        Ok(err.to_string())
    } else {
        Err(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::LoginRequired => return redirect_found(LOGIN_PATH),
            AppError::Domain(err) => {
                let (status, msg) = match &err {
                    DomainError::Validation { field, .. } => {
                        debug!(field = *field, "validation failed");
                        (StatusCode::BAD_REQUEST, err.to_string())
                    }
                    DomainError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                    DomainError::IncorrectUsername | DomainError::IncorrectPassword => {
                        (StatusCode::UNAUTHORIZED, err.to_string())
                    }
                    DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                    DomainError::Forbidden => (
                        StatusCode::FORBIDDEN,
                        "you are not the author of this post".to_string(),
                    ),
                    DomainError::Unexpected(detail) => {
                        error!(error = %detail, "unexpected domain error");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "internal error".to_string(),
                        )
                    }
                };
                (status, msg)
            }
            AppError::Form(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Internal(err) => {
                error!(error = ?err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        let page = ErrorPage {
            status,
            detail: msg,
        };
        let mut response = page.render(None);
        response.extensions_mut().insert(page);
        response
    }
}

/// Kept on error responses so the request context can render them again
/// with the navigation of the logged-in user.
#[derive(Debug, Clone)]
pub(crate) struct ErrorPage {
    status: StatusCode,
    detail: String,
}

impl ErrorPage {
    pub(crate) fn render(&self, user: Option<&User>) -> Response {
        let reason = self.status.canonical_reason().unwrap_or("Error");
        (
            self.status,
            error_page(user, self.status.as_u16(), reason, &self.detail),
        )
            .into_response()
    }
}
