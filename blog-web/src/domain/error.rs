use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("User {0} is already registered.")]
    AlreadyExists(String),

    #[error("Incorrect username.")]
    IncorrectUsername,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("forbidden")]
    Forbidden,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    /// Errors the user can fix by resubmitting the form. Their `Display` text is
    /// shown as the flash message.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. }
                | DomainError::AlreadyExists(_)
                | DomainError::IncorrectUsername
                | DomainError::IncorrectPassword
        )
    }
}
