use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::adaptive::AdaptiveLoadError;
use super::attach::{AttachResult, SourceAttacher};
use super::generation::GenerationToken;
use super::keyboard::{shortcut_for, KeyInput, ShortcutAction};
use super::session::{clamp_volume, percent, PlaybackSession, PlaybackState};
use super::status::StatusArea;
use super::surface::{MediaDiagnostics, PlayRejection, PlaybackSurface};
use super::ui::{speed_label, Fit, UiState};
use crate::config::PlayerSettings;
use crate::constants::{SEEK_STEP_SECS, VOLUME_DRAG_RANGE_PX, VOLUME_STEP};

/// Both the unmuted and the muted play attempt were rejected.
///
/// Recoverable: the page stays interactive and the next gesture may retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("playback blocked for {src}: {rejection}")]
pub struct PlaybackBlocked {
    pub src: String,
    pub rejection: PlayRejection,
    pub diagnostics: MediaDiagnostics,
}

impl PlaybackBlocked {
    /// Status-area text describing what the element reported.
    #[must_use]
    pub fn diagnostic_message(&self) -> String {
        let src = if self.src.is_empty() {
            "[empty]"
        } else {
            &self.src
        };
        let media_error = self
            .diagnostics
            .error_code
            .map_or_else(|| "null".to_string(), |code| code.to_string());
        format!(
            "Playback blocked. | src:{src} | mediaError={media_error} | readyState={} | networkState={} | Check server: must return raw video (200/206) with a video Content-Type, not an HTML page or attachment.",
            self.diagnostics.ready_state, self.diagnostics.network_state
        )
    }
}

/// How a successful play request started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStart {
    Unmuted,
    /// Started only after forcing mute; the previous mute flag was restored.
    MutedFallback,
    /// The source changed while the play promise was pending; nothing updated.
    Superseded,
}

/// Events the element fires that the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
    LoadedMetadata,
    TimeUpdate,
    Error,
    /// The adaptive library gave up on the manifest of the attach that owns `generation`.
    AdaptiveFailure {
        generation: GenerationToken,
        error: AdaptiveLoadError,
    },
}

#[derive(Debug, Clone, Copy)]
struct VolumeDrag {
    start_y: f64,
    start_volume: f64,
}

/// Owns the playback surface and every playback state transition.
#[derive(Debug)]
pub struct PlaybackController<S: PlaybackSurface> {
    surface: S,
    attacher: SourceAttacher,
    session: PlaybackSession,
    ui: UiState,
    status: StatusArea,
    settings: PlayerSettings,
    drag: Option<VolumeDrag>,
    seek_preview: Option<f64>,
}

impl<S: PlaybackSurface> PlaybackController<S> {
    #[must_use]
    pub fn new(surface: S, attacher: SourceAttacher, settings: PlayerSettings) -> Self {
        let mut session = PlaybackSession::new();
        session.set_volume(surface.volume());
        session.muted = surface.muted() || session.volume == 0.0;

        let mut ui = UiState {
            prefer_highest_quality: settings.prefer_highest_quality,
            volume_slider: session.audible_percent(),
            ..UiState::default()
        };
        ui.set_muted_icon(session.muted);

        Self {
            surface,
            attacher,
            session,
            ui,
            status: StatusArea::new(),
            settings,
            drag: None,
            seek_preview: None,
        }
    }

    /// Put `url` on the surface and wait (bounded) for metadata.
    ///
    /// Leaves the session in `Ready` with the overlay shown; playing is a
    /// separate step.
    pub async fn attach(&mut self, url: Option<&str>) -> AttachResult {
        self.set_state(PlaybackState::Loading);
        self.ui.fit = Fit::Contain;
        self.seek_preview = None;

        let prefer_highest = self.ui.prefer_highest_quality;
        let result = self
            .attacher
            .attach(&mut self.surface, url, prefer_highest)
            .await;

        if prefer_highest && result.is_adaptive() {
            self.attacher.pin_highest_level();
        }
        if result.generation.is_current() {
            self.set_state(PlaybackState::Ready);
            self.ui.set_time(0.0, self.surface.duration());
            self.ui.progress_percent = 0.0;
        }
        result
    }

    /// Start playback in response to a user gesture.
    ///
    /// Tries unmuted, then once more forcibly muted (restoring the previous
    /// mute flag afterwards). If both are rejected the session is `Blocked`
    /// and a diagnostic goes to the status area.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackBlocked`] when both attempts are rejected.
    pub async fn request_play(&mut self) -> Result<PlayStart, PlaybackBlocked> {
        let token = self.attacher.generation();
        let src = self.current_src();
        debug!(src = %src, "Requesting playback");

        let first = match self.surface.play().await {
            Ok(()) => return Ok(self.on_play_started(&token, PlayStart::Unmuted)),
            Err(rejection) => rejection,
        };
        debug!(reason = %first.reason, "Play rejected, retrying muted");

        let was_muted = self.surface.muted();
        self.surface.set_muted(true);
        let second = self.surface.play().await;
        self.surface.set_muted(was_muted);

        match second {
            Ok(()) => {
                info!(src = %src, "Muted playback started");
                Ok(self.on_play_started(&token, PlayStart::MutedFallback))
            }
            Err(rejection) => {
                let blocked = PlaybackBlocked {
                    src,
                    rejection,
                    diagnostics: self.surface.diagnostics(),
                };
                if token.is_current() {
                    self.set_state(PlaybackState::Blocked);
                    self.status.error(&blocked.diagnostic_message());
                }
                warn!(
                    src = %blocked.src,
                    error_code = ?blocked.diagnostics.error_code,
                    ready_state = blocked.diagnostics.ready_state,
                    network_state = blocked.diagnostics.network_state,
                    "Muted play rejected, playback blocked"
                );
                Err(blocked)
            }
        }
    }

    fn on_play_started(&mut self, token: &GenerationToken, start: PlayStart) -> PlayStart {
        if !token.is_current() {
            debug!("Play resolved for a superseded source");
            return PlayStart::Superseded;
        }
        self.set_state(PlaybackState::Playing);
        self.enter_cinema();
        start
    }

    pub fn pause(&mut self) {
        self.surface.pause();
        self.set_state(PlaybackState::Paused);
    }

    /// Play if paused, otherwise pause. Rejections are reported, not returned.
    pub async fn toggle_play(&mut self) {
        if self.surface.is_paused() {
            // Blocked playback is already reported to the status area.
            let _ = self.request_play().await;
        } else {
            self.pause();
        }
    }

    /// React to an element event.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Play => {
                self.set_state(PlaybackState::Playing);
                self.enter_cinema();
            }
            MediaEvent::Pause => {
                if self.session.state != PlaybackState::Ended {
                    self.set_state(PlaybackState::Paused);
                }
            }
            MediaEvent::Ended => self.set_state(PlaybackState::Ended),
            MediaEvent::LoadedMetadata => {
                if self.session.state == PlaybackState::Loading {
                    self.set_state(PlaybackState::Ready);
                }
                self.ui.set_time(0.0, self.surface.duration());
            }
            MediaEvent::TimeUpdate => {
                let current = self.surface.current_time();
                let duration = self.surface.duration();
                if self.seek_preview.is_none() {
                    if duration.is_finite() {
                        let pct = current / duration.max(1.0) * 100.0;
                        if !pct.is_nan() {
                            self.ui.progress_percent = pct.clamp(0.0, 100.0);
                        }
                    }
                    self.ui.set_time(current, duration);
                }
            }
            MediaEvent::Error => {
                let diagnostics = self.surface.diagnostics();
                warn!(error_code = ?diagnostics.error_code, "Media element error");
                self.status.error(&format!(
                    "media element error, code={}",
                    diagnostics
                        .error_code
                        .map_or_else(|| "unknown".to_string(), |c| c.to_string())
                ));
            }
            MediaEvent::AdaptiveFailure { generation, error } => {
                if self
                    .attacher
                    .recover_adaptive_failure(&mut self.surface, &generation, &error)
                {
                    self.set_state(PlaybackState::Loading);
                }
            }
        }
    }

    // Volume

    /// Swap between muted and the last non-zero volume.
    pub fn toggle_mute(&mut self) {
        if self.surface.muted() || self.surface.volume() == 0.0 {
            let restore = if self.session.last_volume > 0.0 {
                self.session.last_volume
            } else {
                1.0
            };
            self.surface.set_muted(false);
            self.surface.set_volume(restore);
            self.session.set_volume(restore);
        } else {
            self.session.last_volume = self.surface.volume();
            self.surface.set_muted(true);
            self.session.muted = true;
        }
        self.volume_changed();
    }

    /// Set the volume directly (slider, drag, keyboard). Mutes iff exactly zero.
    pub fn set_volume(&mut self, volume: f64) {
        let volume = clamp_volume(volume);
        self.surface.set_volume(volume);
        self.surface.set_muted(volume == 0.0);
        self.session.set_volume(volume);
        self.volume_changed();
    }

    pub fn adjust_volume(&mut self, delta: f64) {
        self.set_volume(self.surface.volume() + delta);
    }

    /// Slider position `0..=100`.
    pub fn set_volume_percent(&mut self, value: u8) {
        self.set_volume(f64::from(value.min(100)) / 100.0);
    }

    /// Pointer went down on the vertical volume zone at `y` (CSS pixels).
    pub fn begin_volume_drag(&mut self, y: f64) {
        let start_volume = if self.surface.muted() {
            self.session.last_volume
        } else {
            self.surface.volume()
        };
        let start_volume = if start_volume > 0.0 { start_volume } else { 1.0 };
        self.surface.set_muted(false);
        self.session.muted = false;
        self.drag = Some(VolumeDrag {
            start_y: y,
            start_volume,
        });
        self.flash_volume(percent(start_volume));
    }

    /// Pointer moved to `y`; dragging up raises the volume.
    pub fn move_volume_drag(&mut self, y: f64) {
        let Some(drag) = self.drag else {
            return;
        };
        let delta = (drag.start_y - y) / VOLUME_DRAG_RANGE_PX;
        self.set_volume(drag.start_volume + delta);
    }

    pub fn end_volume_drag(&mut self) {
        self.drag = None;
    }

    fn volume_changed(&mut self) {
        self.ui.set_muted_icon(self.session.muted);
        let audible = self.session.audible_percent();
        self.ui.volume_slider = audible;
        self.flash_volume(audible);
    }

    fn flash_volume(&mut self, percent: u8) {
        self.ui
            .flash_volume(percent, Instant::now(), self.settings.volume_indicator_duration);
    }

    // Seeking

    /// Seek range is being dragged: show the target time, don't seek yet.
    pub fn preview_seek(&mut self, percent: f64) {
        let duration = self.surface.duration();
        let target = seek_target(percent, duration);
        self.seek_preview = Some(target);
        self.ui.progress_percent = percent.clamp(0.0, 100.0);
        self.ui.set_time(target, duration);
    }

    /// Seek range released: commit the position.
    pub fn commit_seek(&mut self, percent: f64) {
        let duration = self.surface.duration();
        let target = seek_target(percent, duration);
        self.seek_preview = None;
        self.surface.set_current_time(target);
        self.ui.progress_percent = percent.clamp(0.0, 100.0);
        self.ui.set_time(target, duration);
    }

    /// Relative seek, clamped to `[0, duration]`. A live stream's infinite
    /// duration leaves the upper end open; an unknown one pins to 0.
    pub fn seek_by(&mut self, delta: f64) {
        let duration = self.surface.duration();
        let upper = if duration.is_nan() { 0.0 } else { duration.max(0.0) };
        let target = (self.surface.current_time() + delta).clamp(0.0, upper);
        self.surface.set_current_time(target);
        self.ui.set_time(target, self.surface.duration());
    }

    // Presentation

    pub fn cycle_speed(&mut self) {
        let rate = self.session.cycle_rate();
        self.surface.set_playback_rate(rate);
        self.ui.speed_label = speed_label(rate);
    }

    pub fn enter_cinema(&mut self) {
        self.ui.cinema = true;
        self.ui.fit = Fit::Contain;
    }

    pub fn toggle_cinema(&mut self) {
        self.ui.cinema = !self.ui.cinema;
        self.ui.fit = Fit::Contain;
    }

    pub fn toggle_fit(&mut self) {
        self.ui.fit = self.ui.fit.toggled();
    }

    pub fn set_prefer_highest_quality(&mut self, prefer: bool) {
        self.ui.prefer_highest_quality = prefer;
    }

    pub async fn toggle_fullscreen(&mut self) {
        let target = !self.ui.fullscreen;
        match self.surface.set_fullscreen(target).await {
            Ok(()) => self.ui.fullscreen = target,
            Err(e) => self.status.error(&e.to_string()),
        }
    }

    /// Handle a `keydown`; keys typed into text fields are ignored.
    pub async fn handle_key(&mut self, input: &KeyInput) -> Option<ShortcutAction> {
        let action = shortcut_for(input, SEEK_STEP_SECS, VOLUME_STEP)?;
        match action {
            ShortcutAction::TogglePlay => self.toggle_play().await,
            ShortcutAction::SeekBy(delta) => self.seek_by(delta),
            ShortcutAction::AdjustVolume(delta) => self.adjust_volume(delta),
            ShortcutAction::ToggleFullscreen => self.toggle_fullscreen().await,
            ShortcutAction::ToggleCinema => self.toggle_cinema(),
            ShortcutAction::ToggleMute => self.toggle_mute(),
        }
        Some(action)
    }

    /// Expire transient UI such as the volume badge.
    pub fn tick(&mut self, now: Instant) {
        self.ui.expire(now);
    }

    pub fn mark_user_interaction(&mut self) {
        if !self.session.user_interacted {
            debug!("First user gesture recorded");
        }
        self.session.user_interacted = true;
    }

    /// Show the overlay without changing state (e.g. a gated autoplay).
    pub fn show_overlay(&mut self) {
        self.ui.show_overlay();
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.session.state = state;
        self.ui.apply_state(state);
    }

    fn current_src(&self) -> String {
        self.surface
            .current_src()
            .filter(|s| !s.is_empty())
            .or_else(|| self.attacher.current_url().map(str::to_string))
            .unwrap_or_default()
    }

    // Accessors

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn attacher(&self) -> &SourceAttacher {
        &self.attacher
    }

    #[must_use]
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut PlaybackSession {
        &mut self.session
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub(crate) fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    #[must_use]
    pub fn status(&self) -> &StatusArea {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusArea {
        &mut self.status
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn seek_target(percent: f64, duration: f64) -> f64 {
    percent.clamp(0.0, 100.0) / 100.0 * finite_or_zero(duration)
}
