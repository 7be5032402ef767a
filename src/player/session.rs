use crate::constants::PLAYBACK_RATES;

/// Playback state machine.
///
/// `Idle → Loading → Ready ⇄ Playing ⇄ Paused → Ended`; any state may move to
/// `Blocked` when both play attempts are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
    Blocked,
}

impl PlaybackState {
    /// States in which the paused-state overlay is shown.
    #[must_use]
    pub const fn shows_overlay(self) -> bool {
        !matches!(self, Self::Playing | Self::Loading)
    }

    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Per-page playback state threaded through the controller and navigator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    /// Index into the post's stream list.
    pub index: usize,
    pub state: PlaybackState,
    pub muted: bool,
    pub volume: f64,
    /// Last non-zero volume, restored by unmuting.
    pub last_volume: f64,
    rate_index: usize,
    /// Set by the first play gesture; autoplay never happens before it.
    pub user_interacted: bool,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self {
            index: 0,
            state: PlaybackState::Idle,
            muted: false,
            volume: 1.0,
            last_volume: 1.0,
            rate_index: 0,
            user_interacted: false,
        }
    }
}

impl PlaybackSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn playback_rate(&self) -> f64 {
        PLAYBACK_RATES[self.rate_index]
    }

    /// Advance to the next rate, wrapping around, and return it.
    pub fn cycle_rate(&mut self) -> f64 {
        self.rate_index = (self.rate_index + 1) % PLAYBACK_RATES.len();
        self.playback_rate()
    }

    /// Record a volume change; `muted` follows an exact zero.
    pub fn set_volume(&mut self, volume: f64) {
        let volume = clamp_volume(volume);
        self.volume = volume;
        self.muted = volume == 0.0;
        if volume > 0.0 {
            self.last_volume = volume;
        }
    }

    /// Volume the user hears, as a whole percentage.
    #[must_use]
    pub fn audible_percent(&self) -> u8 {
        if self.muted {
            0
        } else {
            percent(self.volume)
        }
    }
}

/// Clamp to `0.0..=1.0`, mapping `NaN` to silence.
#[must_use]
pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// `0.0..=1.0` as a rounded percentage.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(fraction: f64) -> u8 {
    (clamp_volume(fraction) * 100.0).round() as u8
}
