use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::post::{CreatePostRequest, UpdatePostRequest};
use crate::presentation::app_error::{AppError, AppResult, flash_message};
use crate::presentation::middleware::auth::AuthenticatedUser;
use crate::presentation::middleware::context::RequestContext;
use crate::presentation::views::blog::{create_page, index_page, update_page};
use crate::presentation::{AppState, INDEX_PATH, redirect_found};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct PostForm {
    pub(crate) title: String,
    pub(crate) body: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "blog",
    responses(
        (status = 200, description = "All posts, newest first"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn index(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Html<String>> {
    let posts = state.blog_service(&ctx.db).list_posts().await?;
    Ok(index_page(ctx.user.as_ref(), &posts))
}

#[utoipa::path(
    get,
    path = "/create",
    tag = "blog",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "New post form"),
        (status = 302, description = "Not logged in, redirects to /auth/login")
    )
)]
pub(crate) async fn create_form(AuthenticatedUser(user): AuthenticatedUser) -> Html<String> {
    create_page(Some(&user), None, "", "")
}

#[utoipa::path(
    post,
    path = "/create",
    tag = "blog",
    security(
        ("session_cookie" = [])
    ),
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Created, redirects to /; or not logged in, redirects to /auth/login"),
        (status = 200, description = "Form shown again with the validation message"),
        (status = 400, description = "Malformed form body"),
        (status = 415, description = "Not a form submission"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    AuthenticatedUser(user): AuthenticatedUser,
    form: Result<Form<PostForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let req = CreatePostRequest {
        title: form.title.clone(),
        body: form.body.clone(),
    };

    match state.blog_service(&ctx.db).create_post(user.id, req).await {
        Ok(_) => Ok(redirect_found(INDEX_PATH)),
        Err(err) => {
            let flash = flash_message(err)?;
            Ok(create_page(Some(&user), Some(&flash), &form.title, &form.body).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/{id}/update",
    tag = "blog",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Edit form"),
        (status = 302, description = "Not logged in, redirects to /auth/login"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn update_form(
    State(state): State<AppState>,
    ctx: RequestContext,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let post = state.blog_service(&ctx.db).get_owned_post(user.id, id).await?;
    Ok(update_page(Some(&user), None, post.id, &post.title, &post.body))
}

#[utoipa::path(
    post,
    path = "/{id}/update",
    tag = "blog",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Updated, redirects to /; or not logged in, redirects to /auth/login"),
        (status = 200, description = "Form shown again with the validation message"),
        (status = 400, description = "Malformed form body"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
        (status = 415, description = "Not a form submission"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    form: Result<Form<PostForm>, FormRejection>,
) -> AppResult<Response> {
    let service = state.blog_service(&ctx.db);

    // Existence and ownership are reported before anything about the body.
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            service.get_owned_post(user.id, id).await?;
            return Err(AppError::from(rejection));
        }
    };

    let req = UpdatePostRequest {
        title: form.title.clone(),
        body: form.body.clone(),
    };

    match service.update_post(user.id, id, req).await {
        Ok(_) => Ok(redirect_found(INDEX_PATH)),
        Err(err) => {
            let flash = flash_message(err)?;
            Ok(update_page(Some(&user), Some(&flash), id, &form.title, &form.body).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/{id}/delete",
    tag = "blog",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 302, description = "Deleted, redirects to /; or not logged in, redirects to /auth/login"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete(
    State(state): State<AppState>,
    ctx: RequestContext,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    state.blog_service(&ctx.db).delete_post(user.id, id).await?;
    Ok(redirect_found(INDEX_PATH))
}
