use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::session::Session;

pub(crate) const SESSION_COOKIE: &str = "session";

#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("session token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("session token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) user_id: i64,
    pub(crate) exp: i64,
}

/// Signs and verifies the `session` cookie.
pub(crate) struct SessionTokens {
    secret: String,
    ttl_seconds: i64,
    secure_cookie: bool,
}

impl SessionTokens {
    pub(crate) fn new(secret: &str, ttl_seconds: i64, secure_cookie: bool) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
            secure_cookie,
        }
    }

    pub(crate) fn issue(&self, user_id: i64) -> Result<String, SessionError> {
        let exp = (Utc::now() + Duration::seconds(self.ttl_seconds)).timestamp();
        let claims = Claims { user_id, exp };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(SessionError::Encode)
    }

    pub(crate) fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(SessionError::Decode)?;

        Ok(token_data.claims)
    }

    /// A missing, tampered or expired cookie is simply an anonymous session.
    pub(crate) fn read(&self, jar: &CookieJar) -> Session {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Session::Anonymous;
        };

        match self.verify(cookie.value()) {
            Ok(claims) => Session::Authenticated {
                user_id: claims.user_id,
            },
            Err(err) => {
                debug!(error = %err, "ignoring invalid session cookie");
                Session::Anonymous
            }
        }
    }

    pub(crate) fn login_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .build()
    }

    /// Expired and empty, so browsers drop it whether or not one was sent.
    pub(crate) fn logout_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
        cookie.make_removal();
        cookie
    }
}
