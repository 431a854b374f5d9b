use std::sync::Arc;

use tracing::{info, warn};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::session::Session;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::password::{hash_password, verify_password};
use crate::infrastructure::session::SessionTokens;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) session_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    tokens: Arc<SessionTokens>,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, tokens: Arc<SessionTokens>) -> Self {
        Self { repo, tokens }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        if self.repo.find_by_username(&req.username).await?.is_some() {
            return Err(DomainError::AlreadyExists(req.username));
        }

        let password_hash = hash_password(&req.password)?;
        let user = self.repo.create_user(Self::into_new_user(req, password_hash)).await?;

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.normalize();

        let Some(user_creds) = self.repo.find_by_username(&req.username).await? else {
            warn!(username = %req.username, "login failed: unknown username");
            return Err(DomainError::IncorrectUsername);
        };

        if let Err(err) = verify_password(&req.password, &user_creds.password_hash) {
            if matches!(err, DomainError::IncorrectPassword) {
                warn!(user_id = user_creds.user.id, "login failed: incorrect password");
            }
            return Err(err);
        }

        let session_token = self
            .tokens
            .issue(user_creds.user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        info!(user_id = user_creds.user.id, "user logged in");
        Ok(AuthResult {
            user: user_creds.user,
            session_token,
        })
    }

    /// `None` when anonymous or when the session names a user that no longer exists.
    pub(crate) async fn current_user(&self, session: &Session) -> Result<Option<User>, DomainError> {
        match session.user_id() {
            Some(user_id) => self.repo.find_by_id(user_id).await,
            None => Ok(None),
        }
    }

    fn into_new_user(req: RegisterRequest, password_hash: String) -> NewUser {
        NewUser {
            username: req.username,
            password_hash,
        }
    }
}
