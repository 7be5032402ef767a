use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize};

use crate::links::{classify, LinkMap, ResolvedLinks};

/// A single video post as published in the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    /// Site-relative path of the post page, e.g. `/post/abc.html`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub path: Option<String>,
    /// Absolute URL of the post page.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub links: LinkMap,
    #[serde(skip)]
    pub(crate) resolved: OnceLock<ResolvedLinks>,
}

impl Post {
    /// Create a post with the given identifier and links.
    #[must_use]
    pub fn new(id: impl Into<String>, links: LinkMap) -> Self {
        Self {
            id: Some(id.into()),
            links,
            ..Self::default()
        }
    }

    /// Streams and downloads derived from `links`, computed once.
    pub fn resolved_links(&self) -> &ResolvedLinks {
        self.resolved.get_or_init(|| classify(&self.links))
    }

    /// Playable stream URLs, in feed order.
    pub fn streams(&self) -> &[String] {
        &self.resolved_links().streams
    }

    /// Title, or an empty string when the feed has none.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Description, falling back to the excerpt.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.excerpt.as_deref())
    }

    /// Filename of `path` without the `.html` extension.
    #[must_use]
    pub fn path_stem(&self) -> Option<&str> {
        let path = self.path.as_deref()?;
        let last = path.rsplit('/').next().unwrap_or(path);
        Some(last.strip_suffix(".html").unwrap_or(last)).filter(|s| !s.is_empty())
    }

    /// Best human identifier for log lines.
    #[must_use]
    pub fn display_key(&self) -> &str {
        self.slug
            .as_deref()
            .or(self.id.as_deref())
            .or(self.path.as_deref())
            .unwrap_or_else(|| self.title())
    }

    /// Whether `identifier` names this post by slug, id, path or url.
    #[must_use]
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        if identifier.is_empty() {
            return false;
        }
        self.slug.as_deref() == Some(identifier)
            || self.id.as_deref() == Some(identifier)
            || self.path_stem() == Some(identifier)
            || self
                .url
                .as_deref()
                .is_some_and(|u| u.ends_with(&format!("/{identifier}.html")))
    }
}

/// Feed body: either a bare array or an envelope object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedDocument {
    Posts(Vec<Option<Post>>),
    Envelope(FeedEnvelope),
}

#[derive(Debug, Deserialize)]
pub struct FeedEnvelope {
    pub posts: Vec<Option<Post>>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl FeedDocument {
    /// Flatten into the post list, dropping `null` entries.
    #[must_use]
    pub fn into_posts(self) -> Vec<Post> {
        let posts = match self {
            Self::Posts(posts) => posts,
            Self::Envelope(envelope) => envelope.posts,
        };
        posts.into_iter().flatten().collect()
    }
}

/// Accept strings, numbers and null where the feed is inconsistent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_becomes_string() {
        let post: Post = serde_json::from_str(r#"{"id": 42, "title": "x"}"#).unwrap();
        assert_eq!(post.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_odd_field_types_do_not_reject_the_feed() {
        let doc: FeedDocument = serde_json::from_str(
            r#"[{"id": "a", "title": 2024, "thumb": false, "description": {"x": 1}, "path": null, "excerpt": "  "},
                {"id": "b", "title": "Fine"}]"#,
        )
        .unwrap();
        let posts = doc.into_posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title(), "2024");
        assert_eq!(posts[0].thumb, None);
        assert_eq!(posts[0].summary(), None);
        assert_eq!(posts[1].title(), "Fine");
    }

    #[test]
    fn test_path_stem() {
        let post = Post {
            path: Some("/post/my-video.html".to_string()),
            ..Post::default()
        };
        assert_eq!(post.path_stem(), Some("my-video"));
        assert!(post.matches_identifier("my-video"));
        assert!(!post.matches_identifier("my"));
    }

    #[test]
    fn test_url_suffix_match() {
        let post = Post {
            url: Some("https://site.example/p/clip-7.html".to_string()),
            ..Post::default()
        };
        assert!(post.matches_identifier("clip-7"));
        assert!(!post.matches_identifier(""));
    }

    #[test]
    fn test_summary_prefers_description() {
        let post = Post {
            description: Some(String::new()),
            excerpt: Some("short".to_string()),
            ..Post::default()
        };
        assert_eq!(post.summary(), Some("short"));
    }

    #[test]
    fn test_envelope_and_bare_array() {
        let bare: FeedDocument = serde_json::from_str(r#"[{"id":"a"}, null]"#).unwrap();
        assert_eq!(bare.into_posts().len(), 1);

        let envelope: FeedDocument =
            serde_json::from_str(r#"{"posts":[{"id":"a"},{"id":"b"}],"per_page":5}"#).unwrap();
        assert_eq!(envelope.into_posts().len(), 2);
    }
}
