//! A surface that records the element instead of driving one.
//!
//! Running the player against it before the page is served yields the
//! element's initial markup: the `<source>` the attacher chose, the poster,
//! volume and mute flags.

use async_trait::async_trait;

use super::surface::{FullscreenError, MediaDiagnostics, PlayRejection, PlaybackSurface};

/// One `<source>` child of the video element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceElement {
    pub src: String,
    pub mime_type: String,
}

/// Recorded state of the video element, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSurface {
    sources: Vec<SourceElement>,
    poster: Option<String>,
    muted: bool,
    volume: f64,
    playback_rate: f64,
    current_time: f64,
}

impl Default for SnapshotSurface {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            poster: None,
            muted: false,
            volume: 1.0,
            playback_rate: 1.0,
            current_time: 0.0,
        }
    }
}

impl SnapshotSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sources(&self) -> &[SourceElement] {
        &self.sources
    }

    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        self.poster.as_deref()
    }

    #[must_use]
    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }
}

#[async_trait(?Send)]
impl PlaybackSurface for SnapshotSurface {
    fn clear_sources(&mut self) {
        self.sources.clear();
    }

    fn add_source(&mut self, src: &str, mime_type: &str) {
        self.sources.push(SourceElement {
            src: src.to_string(),
            mime_type: mime_type.to_string(),
        });
    }

    fn load(&mut self) {
        self.current_time = 0.0;
    }

    fn current_src(&self) -> Option<String> {
        self.sources.first().map(|s| s.src.clone())
    }

    async fn play(&mut self) -> Result<(), PlayRejection> {
        Err(PlayRejection::new("no media element before the page loads"))
    }

    fn pause(&mut self) {}

    fn is_paused(&self) -> bool {
        true
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn duration(&self) -> f64 {
        f64::NAN
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    fn set_poster(&mut self, url: &str) {
        self.poster = Some(url.to_string());
    }

    fn diagnostics(&self) -> MediaDiagnostics {
        MediaDiagnostics::default()
    }

    // Nothing to wait for; the browser reports metadata once it loads the page.
    async fn metadata_ready(&mut self) {}

    async fn set_fullscreen(&mut self, _fullscreen: bool) -> Result<(), FullscreenError> {
        Err(FullscreenError("no media element before the page loads".to_string()))
    }
}
