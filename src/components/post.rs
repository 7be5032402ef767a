use maud::{html, Markup, PreEscaped, Render};
use regex::Regex;

use crate::feed::Post;

static IMG_TAG: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());

/// Prepare feed-supplied description HTML for the page: `<img>` tags are
/// removed and newlines become `<br>`. Other markup is kept as published.
#[must_use]
pub fn sanitize_description(description: &str) -> String {
    IMG_TAG.replace_all(description, "").replace('\n', "<br>")
}

/// Title, date and description of a post (`#metaBox`).
#[derive(Debug, Clone, Copy)]
pub struct PostDetails<'a> {
    pub post: &'a Post,
}

impl<'a> PostDetails<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }
}

impl Render for PostDetails<'_> {
    fn render(&self) -> Markup {
        let description = self.post.summary().map(sanitize_description);

        html! {
            section id="metaBox" class="post-meta" {
                h2 id="postTitle" { (self.post.title()) }
                div id="postDate" class="muted" { (self.post.date.as_deref().unwrap_or("")) }
                p id="postDesc" {
                    @if let Some(description) = description {
                        (PreEscaped(description))
                    }
                }
            }
        }
    }
}
