use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::app_error::{AppResult, flash_message};
use crate::presentation::middleware::context::RequestContext;
use crate::presentation::views::auth::{login_page, register_page};
use crate::presentation::{AppState, INDEX_PATH, LOGIN_PATH, redirect_found};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CredentialsForm {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[utoipa::path(
    get,
    path = "/auth/register",
    tag = "auth",
    responses(
        (status = 200, description = "Registration form")
    )
)]
pub(crate) async fn register_form(ctx: RequestContext) -> Html<String> {
    register_page(ctx.user.as_ref(), None, "")
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Registered, redirects to /auth/login"),
        (status = 200, description = "Form shown again with the validation message"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    ctx: RequestContext,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let req = RegisterRequest {
        username: form.username.clone(),
        password: form.password,
    };

    match state.auth_service(&ctx.db).register(req).await {
        Ok(_) => Ok(redirect_found(LOGIN_PATH)),
        Err(err) => {
            let flash = flash_message(err)?;
            Ok(register_page(ctx.user.as_ref(), Some(&flash), &form.username).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/auth/login",
    tag = "auth",
    responses(
        (status = 200, description = "Login form")
    )
)]
pub(crate) async fn login_form(ctx: RequestContext) -> Html<String> {
    login_page(ctx.user.as_ref(), None, "")
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in, sets the session cookie and redirects to /"),
        (status = 200, description = "Form shown again with the credentials message"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    let req = LoginRequest {
        username: form.username.clone(),
        password: form.password,
    };

    match state.auth_service(&ctx.db).login(req).await {
        Ok(result) => {
            debug!(user_id = result.user.id, "issuing session cookie");
            let jar = jar.add(state.sessions.login_cookie(result.session_token));
            Ok((jar, redirect_found(INDEX_PATH)).into_response())
        }
        Err(err) => {
            let flash = flash_message(err)?;
            Ok(login_page(ctx.user.as_ref(), Some(&flash), &form.username).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 302, description = "Session cleared, redirects to /")
    )
)]
pub(crate) async fn logout(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> Response {
    if let Some(user_id) = ctx.session.user_id() {
        info!(user_id, "user logged out");
    }
    let jar = jar.add(state.sessions.logout_cookie());
    (jar, redirect_found(INDEX_PATH)).into_response()
}
