use url::Url;

/// Decoded final path segment of a URL, or the URL itself when it has none.
#[must_use]
pub fn filename_from_url(url: &str) -> String {
    let segment = Url::parse(url).map_or_else(
        |_| url.rsplit('/').next().unwrap_or("").to_string(),
        |parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or("")
                .to_string()
        },
    );

    if segment.is_empty() {
        return url.to_string();
    }

    urlencoding::decode(&segment).map_or(segment.clone(), std::borrow::Cow::into_owned)
}

/// Elide text over `max_len` characters to `max_len - 3` characters plus `...`.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let mut truncated = text
            .chars()
            .take(max_len.saturating_sub(3))
            .collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
