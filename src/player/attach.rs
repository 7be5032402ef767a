use std::time::Duration;

use tracing::{debug, info, warn};

use super::adaptive::{AdaptiveConfig, AdaptiveHandle, AdaptiveLibrary, AdaptiveLoadError};
use super::generation::{Generation, GenerationToken};
use super::surface::PlaybackSurface;
use crate::config::PlayerSettings;
use crate::constants::HLS_MIME_TYPE;
use crate::links::{extension, is_adaptive_manifest};

/// How a source ended up on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Single progressive file via a `<source>` child.
    Progressive,
    /// Manifest driven by the adaptive-streaming library.
    Adaptive,
    /// Manifest handed to the runtime's own player.
    NativeManifest,
    /// No URL; the placeholder stream was loaded.
    Placeholder,
}

/// Outcome of [`SourceAttacher::attach`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachResult {
    pub delivery: Delivery,
    /// URL actually given to the surface.
    pub url: String,
    pub generation: GenerationToken,
    /// Whether metadata became available before the readiness timeout.
    pub ready: bool,
}

impl AttachResult {
    #[must_use]
    pub fn is_adaptive(&self) -> bool {
        self.delivery == Delivery::Adaptive
    }
}

/// Puts exactly one source on the surface at a time.
#[derive(Debug)]
pub struct SourceAttacher {
    library: AdaptiveLibrary,
    placeholder_url: String,
    ready_timeout: Duration,
    handle: Option<Box<dyn AdaptiveHandle>>,
    generation: Generation,
    current_url: Option<String>,
}

impl SourceAttacher {
    #[must_use]
    pub fn new(library: AdaptiveLibrary, settings: &PlayerSettings) -> Self {
        Self {
            library,
            placeholder_url: settings.placeholder_stream_url.clone(),
            ready_timeout: settings.ready_timeout,
            handle: None,
            generation: Generation::new(),
            current_url: None,
        }
    }

    /// Attach `url` to the surface, replacing whatever was there.
    ///
    /// Tears down previous `<source>` children and any adaptive session first,
    /// then waits (bounded) for metadata. Never fails: library problems fall
    /// back to native manifest handling.
    pub async fn attach<S: PlaybackSurface>(
        &mut self,
        surface: &mut S,
        url: Option<&str>,
        prefer_highest_quality: bool,
    ) -> AttachResult {
        self.teardown(surface);
        let generation = self.generation.advance();

        let url = url.map(str::trim).filter(|u| !u.is_empty());
        let (delivery, url) = match url {
            None => {
                let placeholder = self.placeholder_url.clone();
                surface.add_source(&placeholder, "video/mp4");
                surface.load();
                debug!(url = %placeholder, "No stream, loaded placeholder");
                (Delivery::Placeholder, placeholder)
            }
            Some(url) if is_adaptive_manifest(url) => {
                let delivery = self
                    .attach_manifest(surface, url, prefer_highest_quality, &generation)
                    .await;
                (delivery, url.to_string())
            }
            Some(url) => {
                surface.add_source(url, progressive_mime_type(url));
                surface.load();
                debug!(url = %url, "Progressive source set");
                (Delivery::Progressive, url.to_string())
            }
        };

        // A newer attach may have run while the library was loading.
        if !generation.is_current() {
            debug!(url = %url, "Attach superseded before readiness wait");
            return AttachResult {
                delivery,
                url,
                generation,
                ready: false,
            };
        }

        self.current_url = Some(url.clone());
        let ready = tokio::time::timeout(self.ready_timeout, surface.metadata_ready())
            .await
            .is_ok();
        if !ready {
            debug!(url = %url, timeout = ?self.ready_timeout, "Metadata not ready in time");
        }

        AttachResult {
            delivery,
            url,
            generation: generation.clone(),
            ready: ready && generation.is_current(),
        }
    }

    async fn attach_manifest<S: PlaybackSurface>(
        &mut self,
        surface: &mut S,
        url: &str,
        prefer_highest_quality: bool,
        generation: &GenerationToken,
    ) -> Delivery {
        match self.library.engine().await {
            Ok(engine) => {
                let mut handle =
                    engine.create(AdaptiveConfig::new(prefer_highest_quality), generation.clone());
                handle.load_source(url);
                handle.attach_media(surface);
                self.handle = Some(handle);
                info!(url = %url, "Adaptive stream attached");
                Delivery::Adaptive
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Falling back to native manifest playback");
                attach_native_manifest(surface, url);
                Delivery::NativeManifest
            }
        }
    }

    /// Replace a failing adaptive session with native manifest playback.
    ///
    /// Returns `false` and does nothing if `generation` is stale or the
    /// current source is not an adaptive session.
    pub fn recover_adaptive_failure<S: PlaybackSurface>(
        &mut self,
        surface: &mut S,
        generation: &GenerationToken,
        error: &AdaptiveLoadError,
    ) -> bool {
        if !generation.is_current() || self.handle.is_none() {
            debug!(error = %error, "Ignoring adaptive failure from a stale session");
            return false;
        }
        let Some(url) = self.current_url.clone() else {
            return false;
        };
        warn!(url = %url, error = %error, "Adaptive session failed, switching to native playback");
        self.teardown(surface);
        attach_native_manifest(surface, &url);
        true
    }

    /// Pin the adaptive session to its highest quality rung, if the manifest
    /// has parsed. Returns the chosen level.
    pub fn pin_highest_level(&mut self) -> Option<usize> {
        let handle = self.handle.as_mut()?;
        let levels = handle.level_count();
        if levels == 0 {
            return None;
        }
        let highest = levels - 1;
        handle.set_current_level(highest);
        debug!(level = highest, "Adaptive stream pinned to highest level");
        Some(highest)
    }

    /// Destroy the adaptive session and strip the element's sources.
    fn teardown<S: PlaybackSurface>(&mut self, surface: &mut S) {
        surface.clear_sources();
        if let Some(mut handle) = self.handle.take() {
            handle.destroy();
            debug!("Previous adaptive session destroyed");
        }
    }

    #[must_use]
    pub fn adaptive_handle(&self) -> Option<&dyn AdaptiveHandle> {
        self.handle.as_deref()
    }

    #[must_use]
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Token for the most recent attach.
    #[must_use]
    pub fn generation(&self) -> GenerationToken {
        self.generation.token()
    }

    #[must_use]
    pub fn library(&self) -> &AdaptiveLibrary {
        &self.library
    }
}

fn attach_native_manifest<S: PlaybackSurface>(surface: &mut S, url: &str) {
    surface.add_source(url, HLS_MIME_TYPE);
    surface.load();
}

/// Best-guess content type for a progressive file.
#[must_use]
pub fn progressive_mime_type(url: &str) -> &'static str {
    match extension(url).as_deref() {
        Some("mp4") => "video/mp4",
        _ => "video/unknown",
    }
}
