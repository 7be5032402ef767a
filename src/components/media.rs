//! Player shell: the video element and its companion controls.
//!
//! Every element the player drives is rendered here under a fixed id, so the
//! page never has to create missing controls at runtime.

use maud::{html, Markup, Render};

use crate::player::{format_time, MuteIcon, PlayIcon, SourceElement, UiState};

const PLAY_ICON_PATH: &str = "M8 5v14l11-7z";
const PAUSE_ICON_PATH: &str = "M6 19h4V5H6v14zm8-14v14h4V5h-4z";
const SOUND_ICON_PATH: &str = "M5 9v6h4l5 5V4L9 9H5z";
const MUTED_ICON_PATH: &str = "M5 9v6h4l5 5V4L9 9H5zm11.5 3L19 9.5 20.5 11 18 13.5 20.5 16 19 17.5 16.5 15 14 17.5 12.5 16 15 13.5 12.5 11 14 9.5z";

fn icon(id: &str, path: &str) -> Markup {
    html! {
        svg id=(id) viewBox="0 0 24 24" width="18" height="18" aria-hidden="true" {
            path d=(path) {}
        }
    }
}

/// The `#playerWrap` block.
///
/// Renders from a [`UiState`] so the initial paint matches what the
/// controller will report.
#[derive(Debug, Clone)]
pub struct PlayerShell<'a> {
    pub ui: &'a UiState,
    pub poster: Option<&'a str>,
    pub sources: &'a [SourceElement],
}

impl<'a> PlayerShell<'a> {
    #[must_use]
    pub const fn new(ui: &'a UiState) -> Self {
        Self {
            ui,
            poster: None,
            sources: &[],
        }
    }

    /// Thumbnail shown before the first frame.
    #[must_use]
    pub fn with_poster(mut self, poster: Option<&'a str>) -> Self {
        self.poster = poster.map(str::trim).filter(|p| !p.is_empty());
        self
    }

    /// `<source>` children, as recorded from an attached surface.
    #[must_use]
    pub fn with_sources(mut self, sources: &'a [SourceElement]) -> Self {
        self.sources = sources;
        self
    }

    fn play_icon(&self) -> Markup {
        match self.ui.play_icon {
            PlayIcon::Play => icon("iconPlay", PLAY_ICON_PATH),
            PlayIcon::Pause => icon("iconPlay", PAUSE_ICON_PATH),
        }
    }

    fn mute_icon(&self) -> Markup {
        let path = match self.ui.mute_icon {
            MuteIcon::Sound => SOUND_ICON_PATH,
            MuteIcon::Muted => MUTED_ICON_PATH,
        };
        html! {
            span id="iconMute" { (icon("iconMuteSvg", path)) }
        }
    }

    fn wrap_class(&self) -> String {
        let mut class = String::from("player-wrap");
        if self.ui.cinema {
            class.push_str(" cinema");
        }
        if self.ui.fullscreen {
            class.push_str(" is-fullscreen");
        }
        class
    }
}

impl Render for PlayerShell<'_> {
    fn render(&self) -> Markup {
        let ui = self.ui;
        let overlay_style = (!ui.overlay_visible).then_some("display:none");
        let indicator_style = ui.volume_indicator.is_none().then_some("display:none");
        let fit_style = format!("object-fit:{}", ui.fit.as_str());

        html! {
            div id="playerWrap" class=(self.wrap_class()) {
                div id="videoWrap" class="video-wrap" {
                    video id="player"
                        class="vp-video"
                        playsinline
                        preload="metadata"
                        poster=[self.poster]
                        data-vpfit=(ui.fit.as_str())
                        style=(fit_style) {
                            @for source in self.sources {
                                source src=(source.src) type=(source.mime_type);
                            }
                        }
                    div id="overlay" class="overlay" style=[overlay_style] {
                        button id="bigPlay" class="big-play-btn" type="button" aria-label="Play" { "Play" }
                    }
                    div id="volZone" class="vol-zone" {}
                    div id="volumeIndicator" class="volume-indicator" style=[indicator_style] {
                        @if let Some(indicator) = ui.volume_indicator {
                            (indicator.label())
                        }
                    }
                }
                input id="progress"
                    class="vp-progress"
                    type="range"
                    min="0"
                    max="100"
                    step="0.1"
                    value=(format!("{:.1}", ui.progress_percent))
                    aria-label="Seek";
                div class="buttons-row" {
                    button id="playPause" class="icon-btn" type="button" aria-label="Play/Pause" {
                        (self.play_icon())
                    }
                    button id="mute" class="icon-btn" type="button" aria-label="Mute" {
                        (self.mute_icon())
                    }
                    div id="volPop" class="vol-pop" {
                        input id="volSlider"
                            type="range"
                            min="0"
                            max="100"
                            step="1"
                            value=(ui.volume_slider)
                            aria-label="Volume";
                    }
                    div id="time" class="vp-time" { (ui.time_text) }
                    button id="speedBtn" class="icon-btn" type="button" title="Playback speed" { (ui.speed_label) }
                    button id="cinema" class="icon-btn" type="button" title="Cinema mode (t)" { "Cinema" }
                    button id="fs" class="icon-btn" type="button" title="Fullscreen (f)" { "Fullscreen" }
                }
                noscript { p class="muted" { "JavaScript is required for playback." } }
            }
        }
    }
}

/// Initial `current / duration` text before any metadata arrives.
#[must_use]
pub fn initial_time_text() -> String {
    format!("{} / {}", format_time(0.0), format_time(f64::NAN))
}
