//! Download panel for a post's non-streamable links.

use maud::{html, Markup, Render};

use crate::constants::FILENAME_DISPLAY_LIMIT;
use crate::links::{filename_from_url, truncate_text, DownloadLink};

/// Hint shown when a post has nothing to download.
pub const EMPTY_DOWNLOADS_HINT: &str = "No download links (streaming only).";

/// A single download anchor.
///
/// Host landing pages open in a new tab; only direct files get the
/// `download` attribute.
#[derive(Debug, Clone)]
pub struct DownloadItem<'a> {
    pub link: &'a DownloadLink,
}

impl<'a> DownloadItem<'a> {
    #[must_use]
    pub const fn new(link: &'a DownloadLink) -> Self {
        Self { link }
    }

    /// Decoded filename, elided when too long for the row.
    #[must_use]
    pub fn display_name(&self) -> String {
        truncate_text(&filename_from_url(&self.link.url), FILENAME_DISPLAY_LIMIT)
    }
}

impl Render for DownloadItem<'_> {
    fn render(&self) -> Markup {
        let full_name = filename_from_url(&self.link.url);
        let download = self.link.is_direct_file().then_some("");

        html! {
            a class="download-link item"
                href=(self.link.url)
                target="_blank"
                rel="noopener noreferrer"
                download=[download]
                data-source=(self.link.source.key()) {
                span class="dl-source" { (self.link.source.label()) }
                span class="dl-center" title=(full_name) { (self.display_name()) }
            }
        }
    }
}

/// The `#downloadArea` contents.
#[derive(Debug, Clone)]
pub struct DownloadPanel<'a> {
    pub downloads: &'a [DownloadLink],
}

impl<'a> DownloadPanel<'a> {
    #[must_use]
    pub const fn new(downloads: &'a [DownloadLink]) -> Self {
        Self { downloads }
    }
}

impl Render for DownloadPanel<'_> {
    fn render(&self) -> Markup {
        html! {
            div id="downloadArea" {
                div class="download-list" {
                    @if self.downloads.is_empty() {
                        p class="download-empty muted" { (EMPTY_DOWNLOADS_HINT) }
                    } @else {
                        @for link in self.downloads {
                            (DownloadItem::new(link))
                        }
                    }
                }
            }
        }
    }
}
