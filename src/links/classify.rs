use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::sources::SourceTag;

static PLAYABLE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\.(mp4|m3u8|webm|ogg)$").unwrap());

static DIRECT_FILE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)\.(zip|rar|7z|mp4|webm|ogg)$").unwrap());

/// Raw `links` object of a post: source tag key to URLs, in feed order.
///
/// Non-string entries and blank strings are dropped while parsing; everything
/// else is kept verbatim (trimmed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkMap(BTreeMap<String, Vec<String>>);

impl LinkMap {
    /// Build from `(tag, urls)` pairs.
    pub fn from_pairs<I, K, U>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<U>)>,
        K: Into<String>,
        U: Into<String>,
    {
        Self::merged(
            pairs
                .into_iter()
                .map(|(k, urls)| (k.into(), urls.into_iter().map(Into::into).collect())),
        )
    }

    /// Fold keys that name the same tag (`videy`, `Videy`) into one entry.
    fn merged(entries: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, urls) in entries {
            let canonical = SourceTag::from_key(&key).key().to_string();
            map.entry(canonical).or_default().extend(urls);
        }
        Self(map)
    }

    /// URLs under a given tag, empty when absent.
    #[must_use]
    pub fn urls(&self, tag: &SourceTag) -> &[String] {
        self.0.get(tag.key()).map_or(&[], Vec::as_slice)
    }

    /// Tags present in the map in classification order: streamable first,
    /// then known download hosts by priority, then any others alphabetically.
    #[must_use]
    pub fn ordered_tags(&self) -> Vec<SourceTag> {
        let present: Vec<SourceTag> = self.0.keys().map(|k| SourceTag::from_key(k)).collect();
        let mut ordered = Vec::with_capacity(present.len());
        ordered.push(SourceTag::STREAMABLE);
        ordered.extend(SourceTag::DOWNLOAD_HOSTS);
        ordered.retain(|tag| present.contains(tag));
        for tag in present {
            if matches!(tag, SourceTag::Other(_)) && !ordered.contains(&tag) {
                ordered.push(tag);
            }
        }
        ordered
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

impl<'de> Deserialize<'de> for LinkMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
        let entries = raw.unwrap_or_default().into_iter().map(|(key, value)| {
            let urls = match value {
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        serde_json::Value::String(s) => {
                            Some(s.trim().to_string()).filter(|s| !s.is_empty())
                        }
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            (key, urls)
        });
        Ok(Self::merged(entries))
    }
}

/// A link that is offered for download rather than played in-page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub url: String,
    pub source: SourceTag,
}

impl DownloadLink {
    /// Whether the browser should be told to save the target directly.
    #[must_use]
    pub fn is_direct_file(&self) -> bool {
        is_direct_file(&self.url)
    }
}

/// A post's links split into playable streams and download links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLinks {
    pub streams: Vec<String>,
    pub downloads: Vec<DownloadLink>,
}

/// Partition a link map into streams and downloads.
///
/// Streams come only from the streamable tag and only when the extension is
/// playable. Downloads are every URL of every other tag. A streamable URL with
/// an unplayable extension lands in neither list.
#[must_use]
pub fn classify(links: &LinkMap) -> ResolvedLinks {
    let mut resolved = ResolvedLinks::default();

    for tag in links.ordered_tags() {
        let urls = links.urls(&tag);
        if tag.is_streamable() {
            for url in urls {
                if is_playable_url(url) {
                    resolved.streams.push(url.clone());
                } else {
                    debug!(url = %url, "Dropping streamable link without a playable extension");
                }
            }
        } else {
            resolved
                .downloads
                .extend(urls.iter().map(|url| DownloadLink {
                    url: url.clone(),
                    source: tag.clone(),
                }));
        }
    }

    resolved
}

/// Strip query string and fragment, leaving scheme, host and path.
fn path_part(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Lowercased extension of the URL path, if any.
#[must_use]
pub fn extension(url: &str) -> Option<String> {
    let path = path_part(url);
    let last = path.rsplit('/').next().unwrap_or(path);
    last.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// `.mp4 .m3u8 .webm .ogg`, ignoring query string and case.
#[must_use]
pub fn is_playable_url(url: &str) -> bool {
    PLAYABLE.is_match(path_part(url))
}

/// Archive and media formats a browser can save directly.
#[must_use]
pub fn is_direct_file(url: &str) -> bool {
    DIRECT_FILE.is_match(path_part(url))
}

/// Whether the URL names an adaptive (HLS) manifest.
#[must_use]
pub fn is_adaptive_manifest(url: &str) -> bool {
    extension(url).as_deref() == Some("m3u8")
}
