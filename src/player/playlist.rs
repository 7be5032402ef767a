use thiserror::Error;
use tracing::{debug, info};

use super::attach::AttachResult;
use super::controller::{PlayStart, PlaybackBlocked, PlaybackController};
use super::surface::PlaybackSurface;
use super::ui::PositionIndicator;

/// The playlist index input held something that is not a valid position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{input}' is not a position between 1 and {total}")]
pub struct InvalidPosition {
    pub input: String,
    pub total: usize,
}

/// What a navigation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub index: usize,
    pub attach: AttachResult,
    /// `None` when play was not attempted because the user has not interacted yet.
    pub play: Option<Result<PlayStart, PlaybackBlocked>>,
}

/// Result of the element's `ended` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndedOutcome {
    Advanced(Navigation),
    /// Last item finished; stays put with the overlay shown.
    Finished,
}

/// Moves through a post's stream list.
///
/// The current index lives in the controller's session; the navigator only
/// owns the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistNavigator {
    streams: Vec<String>,
}

impl PlaylistNavigator {
    #[must_use]
    pub fn new(streams: Vec<String>) -> Self {
        Self { streams }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    #[must_use]
    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    /// Clamp any index into `[0, len - 1]` (0 for an empty list).
    #[must_use]
    pub fn clamp(&self, index: i64) -> usize {
        let last = self.streams.len().saturating_sub(1);
        usize::try_from(index.max(0)).map_or(last, |i| i.min(last))
    }

    /// Load the first stream without playing it.
    pub async fn load_initial<S: PlaybackSurface>(
        &self,
        controller: &mut PlaybackController<S>,
    ) -> AttachResult {
        let index = 0;
        self.set_position(controller, index);
        let attach = controller.attach(self.streams.get(index).map(String::as_str)).await;
        controller.show_overlay();
        attach
    }

    /// Switch to `index` (clamped), attach it, and play only if the user has
    /// already interacted with the page.
    pub async fn play_at<S: PlaybackSurface>(
        &self,
        controller: &mut PlaybackController<S>,
        index: i64,
    ) -> Navigation {
        let index = self.clamp(index);
        self.set_position(controller, index);
        debug!(index, total = self.len(), "Switching playlist item");

        let attach = controller.attach(self.streams.get(index).map(String::as_str)).await;

        let play = if controller.session().user_interacted {
            Some(controller.request_play().await)
        } else {
            controller.show_overlay();
            None
        };

        Navigation {
            index,
            attach,
            play,
        }
    }

    /// Next item, if there is one.
    pub async fn next<S: PlaybackSurface>(
        &self,
        controller: &mut PlaybackController<S>,
    ) -> Option<Navigation> {
        let current = controller.session().index;
        if current + 1 >= self.len() {
            return None;
        }
        Some(self.play_at(controller, to_i64(current) + 1).await)
    }

    /// Previous item, if there is one.
    pub async fn prev<S: PlaybackSurface>(
        &self,
        controller: &mut PlaybackController<S>,
    ) -> Option<Navigation> {
        let current = controller.session().index;
        if current == 0 {
            return None;
        }
        Some(self.play_at(controller, to_i64(current) - 1).await)
    }

    /// Jump to the 1-based position typed into the index input.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPosition`] for anything that is not an in-range whole
    /// number; the indicator is reset to the current position.
    pub async fn jump_to<S: PlaybackSurface>(
        &self,
        controller: &mut PlaybackController<S>,
        input: &str,
    ) -> Result<Navigation, InvalidPosition> {
        match input.trim().parse::<usize>() {
            Ok(position) if (1..=self.len()).contains(&position) => {
                Ok(self.play_at(controller, to_i64(position - 1)).await)
            }
            _ => {
                let current = controller.session().index;
                self.set_position(controller, current);
                Err(InvalidPosition {
                    input: input.to_string(),
                    total: self.len(),
                })
            }
        }
    }

    /// The element finished the current item.
    pub async fn on_ended<S: PlaybackSurface>(
        &self,
        controller: &mut PlaybackController<S>,
    ) -> EndedOutcome {
        let current = controller.session().index;
        if current + 1 < self.len() {
            EndedOutcome::Advanced(self.play_at(controller, to_i64(current) + 1).await)
        } else {
            info!(total = self.len(), "Playlist ended");
            controller.show_overlay();
            EndedOutcome::Finished
        }
    }

    fn set_position<S: PlaybackSurface>(&self, controller: &mut PlaybackController<S>, index: usize) {
        controller.session_mut().index = index;
        controller.ui_mut().position = PositionIndicator {
            current: if self.is_empty() { 0 } else { index + 1 },
            total: self.len(),
        };
    }
}

fn to_i64(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(n: usize) -> PlaylistNavigator {
        PlaylistNavigator::new((0..n).map(|i| format!("https://x/{i}.mp4")).collect())
    }

    #[test]
    fn test_clamp() {
        let nav = navigator(3);
        assert_eq!(nav.clamp(-5), 0);
        assert_eq!(nav.clamp(1), 1);
        assert_eq!(nav.clamp(99), 2);
        assert_eq!(navigator(0).clamp(4), 0);
    }
}
