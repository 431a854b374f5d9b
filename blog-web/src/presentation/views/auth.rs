use axum::response::Html;

use super::{escape, layout};
use crate::domain::user::User;

pub(crate) fn register_page(
    user: Option<&User>,
    flash: Option<&str>,
    username: &str,
) -> Html<String> {
    credentials_page("Register", user, flash, username)
}

pub(crate) fn login_page(
    user: Option<&User>,
    flash: Option<&str>,
    username: &str,
) -> Html<String> {
    credentials_page("Log In", user, flash, username)
}

fn credentials_page(
    title: &str,
    user: Option<&User>,
    flash: Option<&str>,
    username: &str,
) -> Html<String> {
    let header = format!("<h1>{title}</h1>");
    let content = format!(
        r#"  <form method="post">
    <label for="username">Username</label>
    <input name="username" id="username" value="{}" required>
    <label for="password">Password</label>
    <input type="password" name="password" id="password" required>
    <input type="submit" value="{title}">
  </form>"#,
        escape(username)
    );

    layout(title, user, flash, &header, &content)
}
