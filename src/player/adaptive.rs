use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::generation::GenerationToken;
use super::surface::PlaybackSurface;
use crate::constants::ADAPTIVE_MAX_BUFFER;

/// The adaptive-streaming library could not be used for a manifest.
///
/// Always recovered locally by handing the manifest to the element.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdaptiveLoadError {
    #[error("failed to load adaptive streaming library from {url}: {reason}")]
    Script { url: String, reason: String },
    #[error("adaptive streaming is not supported by this runtime")]
    Unsupported,
    #[error("manifest failed to parse: {0}")]
    Manifest(String),
}

/// Options handed to a new adaptive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveConfig {
    /// Never pick a rung larger than the element's rendered size.
    pub cap_level_to_player_size: bool,
    pub max_buffer_length: Duration,
    /// Pin the highest rung as soon as the manifest parses.
    pub start_at_highest_level: bool,
}

impl AdaptiveConfig {
    #[must_use]
    pub fn new(start_at_highest_level: bool) -> Self {
        Self {
            cap_level_to_player_size: true,
            max_buffer_length: ADAPTIVE_MAX_BUFFER,
            start_at_highest_level,
        }
    }
}

/// One live adaptive session bound to the surface.
pub trait AdaptiveHandle {
    fn load_source(&mut self, manifest_url: &str);

    fn attach_media(&mut self, surface: &mut dyn PlaybackSurface);

    /// Quality rungs known so far; zero until the manifest parses.
    fn level_count(&self) -> usize;

    fn current_level(&self) -> Option<usize>;

    fn set_current_level(&mut self, level: usize);

    /// Stop loading, detach from the element and release resources.
    fn destroy(&mut self);
}

impl fmt::Debug for dyn AdaptiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveHandle")
            .field("levels", &self.level_count())
            .field("current_level", &self.current_level())
            .finish()
    }
}

/// The loaded adaptive-streaming library.
pub trait AdaptiveEngine {
    /// Whether the runtime has what the library needs (e.g. Media Source Extensions).
    fn is_supported(&self) -> bool;

    /// Start a session. `generation` identifies the attach that owns it; the
    /// engine's asynchronous callbacks must do nothing once it is stale.
    fn create(&self, config: AdaptiveConfig, generation: GenerationToken) -> Box<dyn AdaptiveHandle>;
}

/// Fetches the library script.
#[async_trait(?Send)]
pub trait AdaptiveLibraryLoader {
    async fn load(&self, script_url: &str) -> Result<Rc<dyn AdaptiveEngine>, AdaptiveLoadError>;
}

/// Lazily loaded, page-wide adaptive library.
///
/// The script is fetched at most once after a success; a failed fetch is not
/// remembered, so the next manifest tries again.
pub struct AdaptiveLibrary {
    loader: Box<dyn AdaptiveLibraryLoader>,
    script_url: String,
    engine: OnceCell<Rc<dyn AdaptiveEngine>>,
}

impl AdaptiveLibrary {
    #[must_use]
    pub fn new(loader: Box<dyn AdaptiveLibraryLoader>, script_url: impl Into<String>) -> Self {
        Self {
            loader,
            script_url: script_url.into(),
            engine: OnceCell::new(),
        }
    }

    /// A library that never loads, for runtimes without adaptive support.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(Box::new(UnavailableLoader), "")
    }

    /// Engine ready to create sessions, loading the script on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the script fails to load or the runtime cannot run it.
    pub async fn engine(&self) -> Result<Rc<dyn AdaptiveEngine>, AdaptiveLoadError> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                debug!(url = %self.script_url, "Loading adaptive streaming library");
                self.loader.load(&self.script_url).await
            })
            .await
            .map(Rc::clone)
            .inspect_err(|e| warn!(error = %e, "Adaptive streaming library unavailable"))?;

        if engine.is_supported() {
            Ok(engine)
        } else {
            Err(AdaptiveLoadError::Unsupported)
        }
    }

    /// Whether a load has already succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.engine.initialized()
    }
}

impl fmt::Debug for AdaptiveLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveLibrary")
            .field("script_url", &self.script_url)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

struct UnavailableLoader;

#[async_trait(?Send)]
impl AdaptiveLibraryLoader for UnavailableLoader {
    async fn load(&self, script_url: &str) -> Result<Rc<dyn AdaptiveEngine>, AdaptiveLoadError> {
        Err(AdaptiveLoadError::Script {
            url: script_url.to_string(),
            reason: "no adaptive streaming library in this runtime".to_string(),
        })
    }
}
