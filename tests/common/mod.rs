//! Scripted fakes for the playback surface and the adaptive streaming library.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use video_post_player::config::PlayerSettings;
use video_post_player::player::{
    AdaptiveConfig, AdaptiveEngine, AdaptiveHandle, AdaptiveLibrary, AdaptiveLibraryLoader,
    AdaptiveLoadError, FullscreenError, GenerationToken, MediaDiagnostics, PlayRejection,
    PlaybackController, PlaybackSurface, SourceAttacher,
};

/// Player settings with a readiness wait short enough for tests.
pub fn test_settings() -> PlayerSettings {
    PlayerSettings {
        ready_timeout: Duration::from_millis(20),
        ..PlayerSettings::default()
    }
}

/// In-memory stand-in for the `<video>` element.
#[derive(Debug)]
pub struct FakeSurface {
    /// `<source>` children as `(src, type)`.
    pub sources: Vec<(String, String)>,
    pub loads: usize,
    pub clears: usize,
    /// Results handed out by successive `play()` calls; empty means accept.
    pub play_results: VecDeque<Result<(), PlayRejection>>,
    /// Mute flag seen by each `play()` call.
    pub muted_at_play: Vec<bool>,
    pub paused: bool,
    pub muted: bool,
    pub volume: f64,
    pub current_time: f64,
    pub duration: f64,
    pub rate: f64,
    pub poster: Option<String>,
    /// `metadata_ready` never resolves, as for a dead source.
    pub stalls: bool,
    pub diagnostics: MediaDiagnostics,
    pub fullscreen: bool,
    pub refuse_fullscreen: bool,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            loads: 0,
            clears: 0,
            play_results: VecDeque::new(),
            muted_at_play: Vec::new(),
            paused: true,
            muted: false,
            volume: 1.0,
            current_time: 0.0,
            duration: 120.0,
            rate: 1.0,
            poster: None,
            stalls: false,
            diagnostics: MediaDiagnostics::default(),
            fullscreen: false,
            refuse_fullscreen: false,
        }
    }

    /// Reject every `play()` call (unmuted and muted).
    pub fn rejecting_all(mut self) -> Self {
        self.play_results = VecDeque::from([
            Err(PlayRejection::new("NotAllowedError")),
            Err(PlayRejection::new("NotAllowedError")),
        ]);
        self
    }

    /// Reject only the first, unmuted `play()` call.
    pub fn rejecting_unmuted(mut self) -> Self {
        self.play_results = VecDeque::from([Err(PlayRejection::new("NotAllowedError"))]);
        self
    }

    pub fn stalling(mut self) -> Self {
        self.stalls = true;
        self
    }
}

#[async_trait(?Send)]
impl PlaybackSurface for FakeSurface {
    fn clear_sources(&mut self) {
        self.sources.clear();
        self.clears += 1;
    }

    fn add_source(&mut self, src: &str, mime_type: &str) {
        self.sources.push((src.to_string(), mime_type.to_string()));
    }

    fn load(&mut self) {
        self.loads += 1;
        self.paused = true;
        self.current_time = 0.0;
    }

    fn current_src(&self) -> Option<String> {
        self.sources.last().map(|(src, _)| src.clone())
    }

    async fn play(&mut self) -> Result<(), PlayRejection> {
        self.muted_at_play.push(self.muted);
        let result = self.play_results.pop_front().unwrap_or(Ok(()));
        if result.is_ok() {
            self.paused = false;
        }
        result
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
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
        self.duration
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn set_poster(&mut self, url: &str) {
        self.poster = Some(url.to_string());
    }

    fn diagnostics(&self) -> MediaDiagnostics {
        self.diagnostics
    }

    async fn metadata_ready(&mut self) {
        if self.stalls {
            std::future::pending::<()>().await;
        }
    }

    async fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), FullscreenError> {
        if self.refuse_fullscreen {
            return Err(FullscreenError("not allowed".to_string()));
        }
        self.fullscreen = fullscreen;
        Ok(())
    }
}

/// Shared counters observed by tests after handing the engine to the player.
#[derive(Debug, Default, Clone)]
pub struct EngineCalls {
    /// Library loads attempted.
    pub loads: Rc<Cell<usize>>,
    /// Handles created.
    pub created: Rc<Cell<usize>>,
    /// Handles created and not yet destroyed.
    pub live: Rc<Cell<usize>>,
    /// Manifests passed to `load_source`, in order.
    pub manifests: Rc<RefCell<Vec<String>>>,
    /// Level most recently pinned on any handle.
    pub pinned_level: Rc<Cell<Option<usize>>>,
    /// Configs handles were created with.
    pub configs: Rc<RefCell<Vec<AdaptiveConfig>>>,
    /// Generation tokens handles were created with.
    pub tokens: Rc<RefCell<Vec<GenerationToken>>>,
}

struct FakeHandle {
    calls: EngineCalls,
    levels: usize,
    current: Option<usize>,
    destroyed: bool,
}

impl AdaptiveHandle for FakeHandle {
    fn load_source(&mut self, manifest_url: &str) {
        self.calls.manifests.borrow_mut().push(manifest_url.to_string());
    }

    fn attach_media(&mut self, surface: &mut dyn PlaybackSurface) {
        surface.load();
    }

    fn level_count(&self) -> usize {
        self.levels
    }

    fn current_level(&self) -> Option<usize> {
        self.current
    }

    fn set_current_level(&mut self, level: usize) {
        self.current = Some(level);
        self.calls.pinned_level.set(Some(level));
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.calls.live.set(self.calls.live.get() - 1);
        }
    }
}

struct FakeEngine {
    supported: bool,
    levels: usize,
    calls: EngineCalls,
}

impl AdaptiveEngine for FakeEngine {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&self, config: AdaptiveConfig, generation: GenerationToken) -> Box<dyn AdaptiveHandle> {
        self.calls.created.set(self.calls.created.get() + 1);
        self.calls.live.set(self.calls.live.get() + 1);
        self.calls.configs.borrow_mut().push(config);
        self.calls.tokens.borrow_mut().push(generation);
        Box::new(FakeHandle {
            calls: self.calls.clone(),
            levels: self.levels,
            current: None,
            destroyed: false,
        })
    }
}

struct FakeLoader {
    supported: bool,
    levels: usize,
    fail: bool,
    calls: EngineCalls,
}

#[async_trait(?Send)]
impl AdaptiveLibraryLoader for FakeLoader {
    async fn load(&self, script_url: &str) -> Result<Rc<dyn AdaptiveEngine>, AdaptiveLoadError> {
        self.calls.loads.set(self.calls.loads.get() + 1);
        if self.fail {
            return Err(AdaptiveLoadError::Script {
                url: script_url.to_string(),
                reason: "network error".to_string(),
            });
        }
        Ok(Rc::new(FakeEngine {
            supported: self.supported,
            levels: self.levels,
            calls: self.calls.clone(),
        }))
    }
}

/// Library whose engine exposes `levels` quality levels.
pub fn adaptive_library(supported: bool, levels: usize) -> (AdaptiveLibrary, EngineCalls) {
    build_library(supported, levels, false)
}

/// Library whose script never loads.
pub fn failing_library() -> (AdaptiveLibrary, EngineCalls) {
    build_library(true, 0, true)
}

fn build_library(supported: bool, levels: usize, fail: bool) -> (AdaptiveLibrary, EngineCalls) {
    let calls = EngineCalls::default();
    let loader = FakeLoader {
        supported,
        levels,
        fail,
        calls: calls.clone(),
    };
    let library = AdaptiveLibrary::new(Box::new(loader), "https://cdn.test/hls.min.js");
    (library, calls)
}

pub fn controller_with(surface: FakeSurface, library: AdaptiveLibrary) -> PlaybackController<FakeSurface> {
    let settings = test_settings();
    let attacher = SourceAttacher::new(library, &settings);
    PlaybackController::new(surface, attacher, settings)
}

/// Controller without adaptive streaming support.
pub fn controller(surface: FakeSurface) -> PlaybackController<FakeSurface> {
    controller_with(surface, AdaptiveLibrary::unavailable())
}
