#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use sqlx::{Connection, SqliteConnection};
use tempfile::TempDir;
use tower::ServiceExt;

use blog_web::{AppState, Database, Settings, build_app};

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    router: Router,
    pub database: Database,
    pub database_url: String,
    _dir: TempDir,
}

impl TestApp {
    /// Fresh schema with users `test`/`test` and `other`/`other` and one post
    /// by `test` dated 2018-01-01.
    pub async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// Like `new`, with extra settings such as `HTTP_REQUEST_BODY_LIMIT_BYTES`.
    pub async fn with_env(extra: &[(&'static str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let database_url = format!("sqlite://{}", dir.path().join("blog.sqlite").display());

        let mut env = HashMap::new();
        env.insert("DATABASE_URL", database_url.clone());
        env.insert("SESSION_SECRET", SECRET.to_string());
        for (key, value) in extra {
            env.insert(*key, value.to_string());
        }
        let settings = Settings::from_lookup(|key| env.get(key).cloned())
            .expect("test settings must be valid");

        let database = Database::new(&settings.database_url).expect("database url must parse");
        database.init_schema().await.expect("schema must apply");

        let router = build_app(AppState::new(database.clone(), &settings), &settings);
        let app = Self {
            router,
            database,
            database_url,
            _dir: dir,
        };

        for name in ["test", "other"] {
            let response = app
                .post_form("/auth/register", &format!("username={name}&password={name}"), None)
                .await;
            assert_eq!(response.status(), 302, "seeding {name} must succeed");
        }

        let mut conn = app.connect().await;
        sqlx::query(
            "INSERT INTO post (title, body, author_id, created) \
             VALUES ('test title', 'test' || char(10) || 'body', 1, '2018-01-01 00:00:00')",
        )
        .execute(&mut conn)
        .await
        .expect("seed post must be inserted");
        conn.close().await.expect("seed connection must close");

        app
    }

    pub async fn connect(&self) -> SqliteConnection {
        SqliteConnection::connect(&self.database_url)
            .await
            .expect("direct connection must open")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("request must build"))
            .await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::CONTENT_LENGTH, form.len());
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).expect("request must build"))
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Logs in and returns the `session=...` pair for the Cookie header.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/auth/login",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        assert_eq!(response.status(), 302, "login as {username} must succeed");
        session_cookie(&response).expect("login must set the session cookie")
    }

    pub async fn post_count(&self) -> i64 {
        let mut conn = self.connect().await;
        sqlx::query_scalar("SELECT COUNT(*) FROM post")
            .fetch_one(&mut conn)
            .await
            .expect("count must succeed")
    }

    pub async fn find_post(&self, id: i64) -> Option<(String, String)> {
        let mut conn = self.connect().await;
        sqlx::query_as("SELECT title, body FROM post WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut conn)
            .await
            .expect("lookup must succeed")
    }
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must be readable");
    String::from_utf8(bytes.to_vec()).expect("body must be utf-8")
}
