use thiserror::Error;
use tracing::debug;
use url::Url;

use super::models::Post;

/// No post matched the page.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no post found for identifier '{identifier}'")]
pub struct NotFoundError {
    pub identifier: String,
}

/// What the page tells us about which post it shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Content of `<meta name="slug">`.
    pub meta_slug: Option<String>,
    /// `?slug=` query parameter.
    pub query_slug: Option<String>,
    /// `?id=` query parameter.
    pub query_id: Option<String>,
    /// Final path segment with `.html` stripped.
    pub path_name: Option<String>,
}

impl PageContext {
    /// Build the context from the page URL and an optional meta tag value.
    #[must_use]
    pub fn from_url(page_url: &Url, meta_slug: Option<&str>) -> Self {
        let query = |key: &str| {
            page_url
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
        };
        let last_segment = page_url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("");
        let decoded = urlencoding::decode(last_segment)
            .map(std::borrow::Cow::into_owned)
            .unwrap_or_else(|_| last_segment.to_string());
        let path_name = decoded.replace(".html", "");

        Self {
            meta_slug: meta_slug.map(str::to_string).filter(|s| !s.is_empty()),
            query_slug: query("slug"),
            query_id: query("id"),
            path_name: Some(path_name).filter(|s| !s.is_empty()),
        }
    }

    /// Explicit hints in priority order: meta tag, `slug`, `id`.
    fn hints(&self) -> impl Iterator<Item = &str> {
        [&self.meta_slug, &self.query_slug, &self.query_id]
            .into_iter()
            .filter_map(|h| h.as_deref())
    }

    /// The identifier reported when nothing matches.
    #[must_use]
    pub fn primary_identifier(&self) -> &str {
        self.hints()
            .next()
            .or(self.path_name.as_deref())
            .unwrap_or("")
    }
}

/// Resolve the post a page shows.
///
/// Tries explicit hints, then the path filename, then a case-insensitive
/// title match on the filename, then the sole post of a one-post feed.
///
/// # Errors
///
/// Returns [`NotFoundError`] with the attempted identifier if nothing matches.
pub fn find_post<'a>(posts: &'a [Post], page: &PageContext) -> Result<&'a Post, NotFoundError> {
    for hint in page.hints() {
        if let Some(post) = posts.iter().find(|p| p.matches_identifier(hint)) {
            debug!(hint = %hint, post = %post.display_key(), "Post matched explicit hint");
            return Ok(post);
        }
    }

    if let Some(name) = page.path_name.as_deref() {
        if let Some(post) = posts.iter().find(|p| p.matches_identifier(name)) {
            debug!(name = %name, post = %post.display_key(), "Post matched page filename");
            return Ok(post);
        }

        let needle = name.to_lowercase();
        if let Some(post) = posts
            .iter()
            .find(|p| p.title().to_lowercase().contains(&needle))
        {
            debug!(name = %name, post = %post.display_key(), "Post matched by title");
            return Ok(post);
        }
    }

    if let [only] = posts {
        debug!(post = %only.display_key(), "Single-post feed, using sole post");
        return Ok(only);
    }

    Err(NotFoundError {
        identifier: page.primary_identifier().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkMap;

    fn post(id: &str, title: &str) -> Post {
        Post {
            title: Some(title.to_string()),
            ..Post::new(id, LinkMap::default())
        }
    }

    fn page(url: &str) -> PageContext {
        PageContext::from_url(&Url::parse(url).unwrap(), None)
    }

    #[test]
    fn test_context_from_url() {
        let ctx = page("https://site.example/post/a.html?slug=b&id=c");
        assert_eq!(ctx.query_slug.as_deref(), Some("b"));
        assert_eq!(ctx.query_id.as_deref(), Some("c"));
        assert_eq!(ctx.path_name.as_deref(), Some("a"));
        assert_eq!(ctx.primary_identifier(), "b");
    }

    #[test]
    fn test_hint_beats_filename() {
        let posts = vec![post("a", "First"), post("b", "Second")];
        let found = find_post(&posts, &page("https://s/a.html?id=b")).unwrap();
        assert_eq!(found.id.as_deref(), Some("b"));
    }

    #[test]
    fn test_meta_tag_beats_query() {
        let posts = vec![post("a", "First"), post("b", "Second")];
        let ctx = PageContext::from_url(&Url::parse("https://s/x.html?id=b").unwrap(), Some("a"));
        assert_eq!(find_post(&posts, &ctx).unwrap().id.as_deref(), Some("a"));
    }

    #[test]
    fn test_unmatched_hint_falls_through_to_filename() {
        let posts = vec![post("a", "First"), post("b", "Second")];
        let found = find_post(&posts, &page("https://s/a.html?id=zzz")).unwrap();
        assert_eq!(found.id.as_deref(), Some("a"));
    }

    #[test]
    fn test_title_substring_match() {
        let posts = vec![post("1", "Holiday Trip Part 2"), post("2", "Other")];
        let found = find_post(&posts, &page("https://s/trip.html")).unwrap();
        assert_eq!(found.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_sole_post_fallback() {
        let posts = vec![post("only", "Lonely")];
        let found = find_post(&posts, &page("https://s/unrelated.html")).unwrap();
        assert_eq!(found.id.as_deref(), Some("only"));
    }

    #[test]
    fn test_not_found_reports_identifier() {
        let posts = vec![post("a", "First"), post("b", "Second")];
        let err = find_post(&posts, &page("https://s/missing.html")).unwrap_err();
        assert_eq!(err.identifier, "missing");
    }
}
