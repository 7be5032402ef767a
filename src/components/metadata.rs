//! Link-preview tags for a post page.

use maud::{html, Markup};

use super::post::sanitize_description;
use crate::feed::Post;
use crate::links::{is_adaptive_manifest, truncate_text};

/// Longest description placed in preview tags.
const PREVIEW_DESCRIPTION_LIMIT: usize = 200;

static TAGS: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"<[^>]*>").unwrap());

/// Open Graph and Twitter card tags for the post page head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewMetadata {
    pub title: String,
    /// Plain text, already truncated.
    pub description: String,
    /// Canonical page URL.
    pub url: String,
    /// Post thumbnail.
    pub image: Option<String>,
    /// First progressive stream; manifests are not advertised.
    pub video: Option<String>,
    pub site_name: Option<String>,
}

impl PreviewMetadata {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            image: None,
            video: None,
            site_name: None,
        }
    }

    /// Preview tags for a post shown at `page_url`.
    #[must_use]
    pub fn for_post(post: &Post, page_url: &str) -> Self {
        let description = post
            .summary()
            .map(|s| plain_text(s, PREVIEW_DESCRIPTION_LIMIT))
            .unwrap_or_default();
        let title = if post.title().is_empty() {
            post.display_key()
        } else {
            post.title()
        };
        let thumb = post.thumb.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let video = post.streams().iter().find(|s| !is_adaptive_manifest(s));

        let mut meta = Self::new(title, description, page_url);
        meta.image = thumb.map(str::to_string);
        meta.video = video.cloned();
        meta
    }

    #[must_use]
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    fn og_type(&self) -> &'static str {
        if self.video.is_some() {
            "video.other"
        } else {
            "website"
        }
    }

    fn twitter_card(&self) -> &'static str {
        if self.image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        }
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        let og = [
            ("og:title", Some(self.title.as_str())),
            ("og:description", Some(self.description.as_str())),
            ("og:url", Some(self.url.as_str())),
            ("og:type", Some(self.og_type())),
            ("og:site_name", self.site_name.as_deref()),
            ("og:image", self.image.as_deref()),
            ("og:video", self.video.as_deref()),
        ];
        let twitter = [
            ("twitter:card", Some(self.twitter_card())),
            ("twitter:title", Some(self.title.as_str())),
            ("twitter:description", Some(self.description.as_str())),
            ("twitter:image", self.image.as_deref()),
        ];

        html! {
            meta name="description" content=(self.description);
            @for (property, value) in og {
                @if let Some(value) = value {
                    meta property=(property) content=(value);
                }
            }
            @for (name, value) in twitter {
                @if let Some(value) = value {
                    meta name=(name) content=(value);
                }
            }
        }
    }
}

/// Description HTML flattened to one line of text.
fn plain_text(html: &str, max_len: usize) -> String {
    let sanitized = sanitize_description(html);
    let flattened = TAGS.replace_all(&sanitized, " ");
    let collapsed = flattened.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_text(&collapsed, max_len)
}
