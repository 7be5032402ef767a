use async_trait::async_trait;
use thiserror::Error;

/// The element's `play()` promise rejected (usually an autoplay-policy denial).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("play() rejected: {reason}")]
pub struct PlayRejection {
    pub reason: String,
}

impl PlayRejection {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The runtime refused a fullscreen change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("fullscreen request failed: {0}")]
pub struct FullscreenError(pub String);

/// Element state reported alongside a blocked playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaDiagnostics {
    /// `MediaError.code`, if the element has an error.
    pub error_code: Option<u16>,
    /// `HTMLMediaElement.networkState`.
    pub network_state: u8,
    /// `HTMLMediaElement.readyState`.
    pub ready_state: u8,
}

/// The on-page element that decodes and shows video.
///
/// Implemented by the host over a real `<video>` element; everything in the
/// player talks to the element only through this trait. All calls happen on
/// the page's single event loop, hence `?Send`.
#[async_trait(?Send)]
pub trait PlaybackSurface {
    /// Remove every `<source>` child and any directly assigned `src`.
    fn clear_sources(&mut self);

    /// Append a `<source>` child.
    fn add_source(&mut self, src: &str, mime_type: &str);

    /// Run the element's load algorithm.
    fn load(&mut self);

    /// URL the element is currently playing from, if any.
    fn current_src(&self) -> Option<String>;

    /// Start playback. Rejections are expected and recoverable.
    async fn play(&mut self) -> Result<(), PlayRejection>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Volume in `0.0..=1.0`.
    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    /// Position in seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Duration in seconds; `NaN` until metadata is known.
    fn duration(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    fn set_poster(&mut self, url: &str);

    fn diagnostics(&self) -> MediaDiagnostics;

    /// Resolves once `loadedmetadata` or `canplay` fires for the current source.
    ///
    /// May never resolve; callers bound it with a timeout.
    async fn metadata_ready(&mut self);

    /// Enter or leave fullscreen for the player wrapper.
    async fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), FullscreenError>;
}
