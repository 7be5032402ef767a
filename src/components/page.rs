//! Complete post viewing pages.

use maud::{html, Markup};

use super::alert::{Alert, StatusLine};
use super::download_panel::DownloadPanel;
use super::layout::PageLayout;
use super::media::PlayerShell;
use super::metadata::PreviewMetadata;
use super::playlist_controls::PlaylistControls;
use super::post::PostDetails;
use crate::config::PlayerSettings;
use crate::feed::Post;
use crate::player::ui::PositionIndicator;
use crate::player::{SourceElement, StatusArea, UiState};

/// The viewing page for one post.
#[derive(Debug, Clone)]
pub struct PostPage<'a> {
    post: &'a Post,
    page_url: &'a str,
    ui: UiState,
    status: StatusArea,
    settings: Option<&'a PlayerSettings>,
    sources: &'a [SourceElement],
}

impl<'a> PostPage<'a> {
    /// Page for `post` with the player in its initial, loaded-but-paused state.
    #[must_use]
    pub fn new(post: &'a Post, page_url: &'a str) -> Self {
        let total = post.streams().len();
        let ui = UiState {
            position: PositionIndicator {
                current: usize::from(total > 0),
                total,
            },
            ..UiState::default()
        };
        Self {
            post,
            page_url,
            ui,
            status: StatusArea::new(),
            settings: None,
            sources: &[],
        }
    }

    /// Paint from a live controller's state instead of the defaults.
    #[must_use]
    pub fn with_ui(mut self, ui: &UiState) -> Self {
        self.ui = ui.clone();
        self
    }

    /// Embed the player settings and take the quality preference from them.
    #[must_use]
    pub fn with_settings(mut self, settings: &'a PlayerSettings) -> Self {
        self.ui.prefer_highest_quality = settings.prefer_highest_quality;
        self.settings = Some(settings);
        self
    }

    #[must_use]
    pub fn with_highest_quality(mut self, prefer: bool) -> Self {
        self.ui.prefer_highest_quality = prefer;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: &StatusArea) -> Self {
        self.status = status.clone();
        self
    }

    /// Sources the player attached before the page was served.
    #[must_use]
    pub fn with_sources(mut self, sources: &'a [SourceElement]) -> Self {
        self.sources = sources;
        self
    }

    fn content(&self) -> Markup {
        let links = self.post.resolved_links();
        let controls = PlaylistControls::new(self.ui.position)
            .with_fit(self.ui.fit)
            .with_highest_quality(self.ui.prefer_highest_quality);

        html! {
            article class="post" {
                (PlayerShell::new(&self.ui)
                    .with_poster(self.post.thumb.as_deref())
                    .with_sources(self.sources))
                (StatusLine::new(&self.status))
                (PostDetails::new(self.post))
                div class="post-actions" {
                    (controls)
                    (DownloadPanel::new(&links.downloads))
                }
            }
        }
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        let title = if self.post.title().is_empty() {
            self.post.display_key()
        } else {
            self.post.title()
        };
        let slug = self.post.slug.as_deref().or(self.post.id.as_deref());

        PageLayout::new(title)
            .with_slug(slug)
            .with_preview(PreviewMetadata::for_post(self.post, self.page_url))
            .with_player_settings(self.settings)
            .render(self.content())
    }
}

/// Page shown when the feed cannot be loaded or no post matches.
///
/// The failure is both the headline alert and the status line, so the page
/// reads the same as a live player reporting it.
#[derive(Debug, Clone)]
pub struct ErrorPage<'a> {
    title: &'a str,
    status: StatusArea,
}

impl<'a> ErrorPage<'a> {
    #[must_use]
    pub fn new(title: &'a str, message: &str) -> Self {
        let mut status = StatusArea::new();
        status.error(message);
        Self { title, status }
    }

    #[must_use]
    pub fn status(&self) -> &StatusArea {
        &self.status
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        let message = self.status.message().unwrap_or_default();
        let ui = UiState::default();

        PageLayout::new(self.title).render(html! {
            article class="post post-error" {
                (Alert::error(message).with_title(self.title))
                (PlayerShell::new(&ui))
                (StatusLine::new(&self.status))
            }
        })
    }
}
