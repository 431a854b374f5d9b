use async_trait::async_trait;

use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::infrastructure::database::RequestDb;

#[derive(Clone)]
pub(crate) struct SqliteUserRepository {
    db: RequestDb,
}

impl SqliteUserRepository {
    pub(crate) fn new(db: RequestDb) -> Self {
        Self { db }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    password_hash: String,
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_user_db_error)?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO user (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username
            "#,
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| match map_user_db_error(err) {
            DomainError::AlreadyExists(_) => DomainError::AlreadyExists(input.username.clone()),
            other => other,
        })?;

        User::new(row.id, row.username).map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_user_db_error)?;
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT
            id,
            username,
            password_hash
            FROM user
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_user_db_error)?;

        if let Some(r) = row {
            let user = User::new(r.id, r.username)
                .map_err(|err| DomainError::Unexpected(err.to_string()))?;

            Ok(Some(UserCredentials {
                user,
                password_hash: r.password_hash,
            }))
        } else {
            Ok(None)
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_user_db_error)?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username
            FROM user
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_user_db_error)?;

        row.map(|r| User::new(r.id, r.username))
            .transpose()
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return DomainError::AlreadyExists("username".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
