use std::fmt::Write;

use axum::response::Html;

use super::{escape, layout};
use crate::domain::post::PostWithAuthor;
use crate::domain::user::User;

pub(crate) fn index_page(user: Option<&User>, posts: &[PostWithAuthor]) -> Html<String> {
    let mut header = String::from("<h1>Posts</h1>");
    if user.is_some() {
        header.push_str(r#"<a class="action" href="/create">New</a>"#);
    }

    let mut content = String::new();
    for (index, entry) in posts.iter().enumerate() {
        if index > 0 {
            content.push_str("  <hr>\n");
        }
        let post = &entry.post;
        let _ = write!(
            content,
            "  <article class=\"post\">\n    <header>\n      <div>\n        <h1>{}</h1>\n        <div class=\"about\">by {} on {}</div>\n      </div>\n",
            escape(&post.title),
            escape(&entry.author_username),
            post.created.format("%Y-%m-%d"),
        );
        if user.is_some_and(|user| post.is_authored_by(user.id)) {
            let _ = writeln!(
                content,
                "      <a class=\"action\" href=\"/{}/update\">Edit</a>",
                post.id
            );
        }
        let _ = write!(
            content,
            "    </header>\n    <p class=\"body\">{}</p>\n  </article>\n",
            escape(&post.body)
        );
    }

    layout("Posts", user, None, &header, &content)
}

pub(crate) fn create_page(
    user: Option<&User>,
    flash: Option<&str>,
    title: &str,
    body: &str,
) -> Html<String> {
    let header = "<h1>New Post</h1>";
    let content = post_form(title, body, "Save");
    layout("New Post", user, flash, header, &content)
}

pub(crate) fn update_page(
    user: Option<&User>,
    flash: Option<&str>,
    post_id: i64,
    title: &str,
    body: &str,
) -> Html<String> {
    let header = format!("<h1>Edit \"{}\"</h1>", escape(title));
    let mut content = post_form(title, body, "Save");
    let _ = write!(
        content,
        "\n  <hr>\n  <form action=\"/{post_id}/delete\" method=\"post\">\n    <input class=\"danger\" type=\"submit\" value=\"Delete\" onclick=\"return confirm('Are you sure?');\">\n  </form>"
    );

    layout("Edit", user, flash, &header, &content)
}

fn post_form(title: &str, body: &str, submit: &str) -> String {
    format!(
        r#"  <form method="post">
    <label for="title">Title</label>
    <input name="title" id="title" value="{}" required>
    <label for="body">Body</label>
    <textarea name="body" id="body">{}</textarea>
    <input type="submit" value="{submit}">
  </form>"#,
        escape(title),
        escape(body)
    )
}
