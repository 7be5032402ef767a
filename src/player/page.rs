use tracing::debug;

use super::adaptive::AdaptiveLibrary;
use super::attach::SourceAttacher;
use super::controller::{MediaEvent, PlaybackController};
use super::keyboard::KeyInput;
use super::playlist::PlaylistNavigator;
use super::surface::PlaybackSurface;
use crate::config::PlayerSettings;
use crate::feed::Post;
use crate::links::ResolvedLinks;

/// Everything the page's controls and the element can send the player.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PlayButton,
    BigPlay,
    SurfaceClick,
    Prev,
    Next,
    /// Value of the playlist index input after `change`.
    PositionInput(String),
    MuteButton,
    VolumeSlider(u8),
    VolumeDragStart { y: f64 },
    VolumeDragMove { y: f64 },
    VolumeDragEnd,
    /// Seek range `input` (dragging), percent.
    SeekInput(f64),
    /// Seek range `change` (released), percent.
    SeekChange(f64),
    Fullscreen,
    Cinema,
    Speed,
    FitToggle,
    HighestQuality(bool),
    Key(KeyInput),
    Media(MediaEvent),
}

/// The player for one post page: controller plus playlist, driven by
/// [`UiEvent`]s from a single dispatch point.
#[derive(Debug)]
pub struct PostPlayer<S: PlaybackSurface> {
    controller: PlaybackController<S>,
    playlist: PlaylistNavigator,
    links: ResolvedLinks,
    post_key: String,
}

impl<S: PlaybackSurface> PostPlayer<S> {
    #[must_use]
    pub fn new(post: &Post, surface: S, library: AdaptiveLibrary, settings: PlayerSettings) -> Self {
        let attacher = SourceAttacher::new(library, &settings);
        let mut controller = PlaybackController::new(surface, attacher, settings);
        if let Some(thumb) = post.thumb.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            controller.surface_mut().set_poster(thumb);
        }
        let links = post.resolved_links().clone();

        Self {
            controller,
            playlist: PlaylistNavigator::new(links.streams.clone()),
            links,
            post_key: post.display_key().to_string(),
        }
    }

    /// Load the first stream (or the placeholder) without playing it.
    pub async fn start(&mut self) {
        self.playlist.load_initial(&mut self.controller).await;
        let message = format!("player ready for post {}", self.post_key);
        self.controller.status_mut().info(&message);
    }

    /// Route one event to the component that owns it.
    pub async fn handle(&mut self, event: UiEvent) {
        let controller = &mut self.controller;
        match event {
            UiEvent::PlayButton => {
                controller.mark_user_interaction();
                controller.enter_cinema();
                controller.toggle_play().await;
            }
            UiEvent::BigPlay => {
                controller.mark_user_interaction();
                let nothing_loaded = controller
                    .surface()
                    .current_src()
                    .is_none_or(|src| src.is_empty());
                if nothing_loaded && !self.playlist.is_empty() {
                    self.playlist.play_at(controller, 0).await;
                } else {
                    controller.enter_cinema();
                    // Blocked playback is already reported to the status area.
                    let _ = controller.request_play().await;
                }
            }
            UiEvent::SurfaceClick => {
                controller.mark_user_interaction();
                if controller.surface().is_paused() {
                    controller.enter_cinema();
                    let _ = controller.request_play().await;
                } else {
                    controller.pause();
                }
            }
            UiEvent::Prev => {
                self.playlist.prev(controller).await;
            }
            UiEvent::Next => {
                self.playlist.next(controller).await;
            }
            UiEvent::PositionInput(input) => {
                if let Err(e) = self.playlist.jump_to(controller, &input).await {
                    debug!(error = %e, "Ignoring playlist position input");
                }
            }
            UiEvent::MuteButton => controller.toggle_mute(),
            UiEvent::VolumeSlider(value) => controller.set_volume_percent(value),
            UiEvent::VolumeDragStart { y } => controller.begin_volume_drag(y),
            UiEvent::VolumeDragMove { y } => controller.move_volume_drag(y),
            UiEvent::VolumeDragEnd => controller.end_volume_drag(),
            UiEvent::SeekInput(percent) => controller.preview_seek(percent),
            UiEvent::SeekChange(percent) => controller.commit_seek(percent),
            UiEvent::Fullscreen => controller.toggle_fullscreen().await,
            UiEvent::Cinema => controller.toggle_cinema(),
            UiEvent::Speed => controller.cycle_speed(),
            UiEvent::FitToggle => controller.toggle_fit(),
            UiEvent::HighestQuality(prefer) => controller.set_prefer_highest_quality(prefer),
            UiEvent::Key(input) => {
                controller.handle_key(&input).await;
            }
            UiEvent::Media(MediaEvent::Ended) => {
                controller.handle_media_event(MediaEvent::Ended);
                self.playlist.on_ended(controller).await;
            }
            UiEvent::Media(event) => controller.handle_media_event(event),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &PlaybackController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<S> {
        &mut self.controller
    }

    #[must_use]
    pub fn playlist(&self) -> &PlaylistNavigator {
        &self.playlist
    }

    /// Streams and downloads of the post this player shows.
    #[must_use]
    pub fn links(&self) -> &ResolvedLinks {
        &self.links
    }
}
