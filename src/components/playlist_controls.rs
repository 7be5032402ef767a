use maud::{html, Markup, Render};

use crate::player::ui::PositionIndicator;
use crate::player::Fit;

/// Prev/next buttons, the 1-based index input, and the fit and quality toggles.
///
/// Rendered only for posts with at least one stream.
#[derive(Debug, Clone, Copy)]
pub struct PlaylistControls {
    pub position: PositionIndicator,
    pub fit: Fit,
    pub prefer_highest_quality: bool,
}

impl PlaylistControls {
    #[must_use]
    pub const fn new(position: PositionIndicator) -> Self {
        Self {
            position,
            fit: Fit::Contain,
            prefer_highest_quality: false,
        }
    }

    #[must_use]
    pub const fn with_fit(mut self, fit: Fit) -> Self {
        self.fit = fit;
        self
    }

    #[must_use]
    pub const fn with_highest_quality(mut self, prefer: bool) -> Self {
        self.prefer_highest_quality = prefer;
        self
    }
}

impl Render for PlaylistControls {
    fn render(&self) -> Markup {
        if self.position.total == 0 {
            return html! {};
        }
        let current = self.position.current.max(1);

        html! {
            div id="playlistControls" class="playlist-controls" {
                button id="plPrev" class="icon-btn" type="button" disabled[current <= 1] { "‹ Prev" }
                input id="plIndex"
                    type="number"
                    min="1"
                    max=(self.position.total)
                    value=(current)
                    aria-label="Playlist position";
                span class="pl-count" { " / " (self.position.total) }
                button id="plNext" class="icon-btn" type="button" disabled[current >= self.position.total] { "Next ›" }
                div class="vp-controls-extra" {
                    button id="fitToggle" class="btn" type="button" title="Toggle video fit (contain / cover)" {
                        "Fit: " (self.fit.as_str())
                    }
                    label {
                        input id="hqToggle" type="checkbox" checked[self.prefer_highest_quality];
                        "Highest quality (HLS)"
                    }
                }
            }
        }
    }
}
