use std::fmt;

/// Where a link in a post comes from.
///
/// Exactly one tag is streamable; every other tag is a download host whose
/// links point at an external file locker or landing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceTag {
    Videy,
    Mediafire,
    Terabox,
    Pixeldrain,
    Bonus,
    /// Any tag the feed uses that has no dedicated handling.
    Other(String),
}

impl SourceTag {
    /// Download hosts in display priority.
    pub const DOWNLOAD_HOSTS: [Self; 4] = [Self::Mediafire, Self::Terabox, Self::Pixeldrain, Self::Bonus];

    /// The tag whose links are eligible for in-page playback.
    pub const STREAMABLE: Self = Self::Videy;

    /// Parse a feed key, case-insensitively.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "videy" => Self::Videy,
            "mediafire" => Self::Mediafire,
            "terabox" => Self::Terabox,
            "pixeldrain" => Self::Pixeldrain,
            "bonus" => Self::Bonus,
            other => Self::Other(other.to_string()),
        }
    }

    /// Key as it appears in the feed.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Videy => "videy",
            Self::Mediafire => "mediafire",
            Self::Terabox => "terabox",
            Self::Pixeldrain => "pixeldrain",
            Self::Bonus => "bonus",
            Self::Other(key) => key,
        }
    }

    #[must_use]
    pub fn is_streamable(&self) -> bool {
        *self == Self::STREAMABLE
    }

    /// Human-readable name for the download panel.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Videy => "Videy".to_string(),
            Self::Mediafire => "Mediafire".to_string(),
            Self::Terabox => "Terabox".to_string(),
            Self::Pixeldrain => "Pixeldrain".to_string(),
            Self::Bonus => "Bonus".to_string(),
            Self::Other(key) if key.is_empty() => "Link".to_string(),
            Self::Other(key) => capitalize(key),
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
