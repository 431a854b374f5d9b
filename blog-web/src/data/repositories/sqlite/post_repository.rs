use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostWithAuthor};
use crate::infrastructure::database::RequestDb;

#[derive(Clone)]
pub(crate) struct SqlitePostRepository {
    db: RequestDb,
}

impl SqlitePostRepository {
    pub(crate) fn new(db: RequestDb) -> Self {
        Self { db }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    body: String,
    author_id: i64,
    created: NaiveDateTime,
}

#[derive(sqlx::FromRow)]
struct PostWithAuthorRow {
    #[sqlx(flatten)]
    post: PostRow,
    username: String,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_post_db_error)?;
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO post (title, body, author_id)
            VALUES (?, ?, ?)
            RETURNING id, title, body, author_id, created
            "#,
        )
        .bind(input.title)
        .bind(input.body)
        .bind(input.author_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_post_db_error)?;
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
            id,
            title,
            body,
            author_id,
            created
            FROM post
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_post_db_error)?;
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE post
            SET title = ?,
                body = ?
            WHERE id = ? AND author_id = ?
            RETURNING id, title, body, author_id, created
            "#,
        )
        .bind(patch.title)
        .bind(patch.body)
        .bind(post_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_post_db_error)?;
        let result = sqlx::query(
            r#"
            DELETE FROM post
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        let mut conn = self.db.acquire().await.map_err(map_post_db_error)?;
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.body,
                p.author_id,
                p.created,
                u.username
            FROM post p
            JOIN user u ON p.author_id = u.id
            ORDER BY p.created DESC, p.id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(PostWithAuthor {
                    post: map_row_to_post(row.post)?,
                    author_username: row.username,
                })
            })
            .collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.body,
        row.author_id,
        row.created.and_utc(),
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
