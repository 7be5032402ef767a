//! UI affordances mirrored from playback state.
//!
//! The host reads [`UiState`] after every event and paints it; nothing here
//! touches the page directly.

use std::time::{Duration, Instant};

use super::session::PlaybackState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayIcon {
    #[default]
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MuteIcon {
    #[default]
    Sound,
    Muted,
}

/// How the video fills the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fit {
    #[default]
    Contain,
    Cover,
}

impl Fit {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Contain => Self::Cover,
            Self::Cover => Self::Contain,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::Cover => "cover",
        }
    }
}

/// Transient "Volume N%" badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeIndicator {
    pub percent: u8,
    pub hide_at: Instant,
}

impl VolumeIndicator {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Volume {}%", self.percent)
    }
}

/// "N / total" playlist position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionIndicator {
    /// 1-based.
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub overlay_visible: bool,
    pub play_icon: PlayIcon,
    pub mute_icon: MuteIcon,
    /// `current / duration`.
    pub time_text: String,
    /// Seek range value, `0.0..=100.0`.
    pub progress_percent: f64,
    pub volume_slider: u8,
    pub volume_indicator: Option<VolumeIndicator>,
    pub cinema: bool,
    pub fullscreen: bool,
    pub fit: Fit,
    pub speed_label: String,
    pub position: PositionIndicator,
    pub prefer_highest_quality: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            overlay_visible: true,
            play_icon: PlayIcon::Play,
            mute_icon: MuteIcon::Sound,
            time_text: format!("{} / {}", format_time(0.0), format_time(f64::NAN)),
            progress_percent: 0.0,
            volume_slider: 100,
            volume_indicator: None,
            cinema: false,
            fullscreen: false,
            fit: Fit::Contain,
            speed_label: speed_label(1.0),
            position: PositionIndicator::default(),
            prefer_highest_quality: false,
        }
    }
}

impl UiState {
    /// Mirror overlay and play icon from the playback state.
    pub fn apply_state(&mut self, state: PlaybackState) {
        self.overlay_visible = state.shows_overlay();
        self.play_icon = if state.is_playing() {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        };
    }

    pub fn show_overlay(&mut self) {
        self.overlay_visible = true;
    }

    pub fn set_muted_icon(&mut self, muted: bool) {
        self.mute_icon = if muted { MuteIcon::Muted } else { MuteIcon::Sound };
    }

    /// Show the volume badge until `now + duration`, replacing any earlier one.
    pub fn flash_volume(&mut self, percent: u8, now: Instant, duration: Duration) {
        self.volume_indicator = Some(VolumeIndicator {
            percent,
            hide_at: now + duration,
        });
    }

    /// Drop expired transient elements.
    pub fn expire(&mut self, now: Instant) {
        if self
            .volume_indicator
            .is_some_and(|indicator| now >= indicator.hide_at)
        {
            self.volume_indicator = None;
        }
    }

    pub fn set_time(&mut self, current: f64, duration: f64) {
        self.time_text = format!("{} / {}", format_time(current), format_time(duration));
    }
}

/// `mm:ss`, or `h:mm:ss` past an hour; `00:00` for non-finite input.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Label of the speed control, e.g. `1.25×`.
#[must_use]
pub fn speed_label(rate: f64) -> String {
    format!("{rate}×")
}
