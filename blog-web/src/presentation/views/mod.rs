use std::fmt::Write;

use axum::response::Html;

use crate::domain::user::User;

pub(crate) mod auth;
pub(crate) mod blog;

const APP_NAME: &str = "Blog";

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wraps `content` (already escaped) in the shared navigation and flash area.
pub(crate) fn layout(
    title: &str,
    user: Option<&User>,
    flash: Option<&str>,
    header: &str,
    content: &str,
) -> Html<String> {
    let mut page = String::new();
    let _ = write!(
        page,
        "<!doctype html>\n<title>{} - {APP_NAME}</title>\n<nav>\n  <h1><a href=\"/\">{APP_NAME}</a></h1>\n  <ul>\n",
        escape(title)
    );

    match user {
        Some(user) => {
            let _ = write!(
                page,
                "    <li><span>{}</span>\n    <li><a href=\"/auth/logout\">Log Out</a>\n",
                escape(&user.username)
            );
        }
        None => {
            page.push_str("    <li><a href=\"/auth/register\">Register</a>\n");
            page.push_str("    <li><a href=\"/auth/login\">Log In</a>\n");
        }
    }

    page.push_str("  </ul>\n</nav>\n<section class=\"content\">\n");
    let _ = writeln!(page, "  <header>{header}</header>");
    if let Some(message) = flash {
        let _ = writeln!(page, "  <div class=\"flash\">{}</div>", escape(message));
    }
    page.push_str(content);
    page.push_str("\n</section>\n");

    Html(page)
}

pub(crate) fn error_page(
    user: Option<&User>,
    status: u16,
    reason: &str,
    detail: &str,
) -> Html<String> {
    let header = format!("<h1>{status} {}</h1>", escape(reason));
    let content = format!("  <p>{}</p>", escape(detail));
    layout(reason, user, None, &header, &content)
}
