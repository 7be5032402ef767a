//! Document skeleton for the post page.
//!
//! Settings for the external player script travel in an inline JSON block
//! (`#playerConfig`).

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

use super::metadata::PreviewMetadata;
use crate::config::PlayerSettings;

const STYLESHEET_PATH: &str = "/assets/style.css";
const PLAYER_SCRIPT_PATH: &str = "/assets/player.js";

/// Player settings as read by the page script from `#playerConfig`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerConfigJson<'a> {
    placeholder_stream_url: &'a str,
    adaptive_library_url: &'a str,
    ready_timeout_ms: u128,
    volume_indicator_ms: u128,
    prefer_highest_quality: bool,
}

impl<'a> From<&'a PlayerSettings> for PlayerConfigJson<'a> {
    fn from(settings: &'a PlayerSettings) -> Self {
        Self {
            placeholder_stream_url: &settings.placeholder_stream_url,
            adaptive_library_url: &settings.adaptive_library_url,
            ready_timeout_ms: settings.ready_timeout.as_millis(),
            volume_indicator_ms: settings.volume_indicator_duration.as_millis(),
            prefer_highest_quality: settings.prefer_highest_quality,
        }
    }
}

/// Serialize settings for embedding in a `<script>` element.
///
/// `</` is escaped so a URL can never close the element early.
fn player_config_json(settings: &PlayerSettings) -> Option<String> {
    serde_json::to_string(&PlayerConfigJson::from(settings))
        .ok()
        .map(|json| json.replace("</", r"<\/"))
}

/// Page skeleton: head metadata, the content inside `main`, then the player
/// script.
#[derive(Debug, Clone)]
pub struct PageLayout<'a> {
    title: &'a str,
    slug: Option<&'a str>,
    preview: Option<PreviewMetadata>,
    player_settings: Option<&'a PlayerSettings>,
}

impl<'a> PageLayout<'a> {
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            slug: None,
            preview: None,
            player_settings: None,
        }
    }

    /// Emit `<meta name="slug">`, the highest-priority post identifier hint.
    #[must_use]
    pub fn with_slug(mut self, slug: Option<&'a str>) -> Self {
        self.slug = slug.filter(|s| !s.is_empty());
        self
    }

    #[must_use]
    pub fn with_preview(mut self, metadata: PreviewMetadata) -> Self {
        self.preview = Some(metadata);
        self
    }

    /// Embed the player settings for the page script.
    #[must_use]
    pub fn with_player_settings(mut self, settings: Option<&'a PlayerSettings>) -> Self {
        self.player_settings = settings;
        self
    }

    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        let config_json = self.player_settings.and_then(player_config_json);

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    @if let Some(slug) = self.slug {
                        meta name="slug" content=(slug);
                    }
                    title { (self.title) }
                    @if let Some(og) = &self.preview {
                        (og.render())
                    }
                    link rel="stylesheet" href=(STYLESHEET_PATH);
                }
                body {
                    main class="container" {
                        (content)
                    }
                    @if let Some(json) = config_json {
                        script id="playerConfig" type="application/json" { (PreEscaped(json)) }
                    }
                    script src=(PLAYER_SCRIPT_PATH) defer {}
                }
            }
        }
    }
}
