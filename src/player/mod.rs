//! Playback engine for a post's streams.
//!
//! The player never touches the page directly: the video element sits behind
//! [`PlaybackSurface`] and the adaptive-streaming library behind
//! [`AdaptiveLibraryLoader`]/[`AdaptiveEngine`]. Everything runs on one event
//! loop, so shared state uses `Rc`/`Cell` rather than locks.

pub mod adaptive;
pub mod attach;
pub mod controller;
pub mod generation;
pub mod keyboard;
pub mod page;
pub mod playlist;
pub mod session;
pub mod snapshot;
pub mod status;
pub mod surface;
pub mod ui;

pub use adaptive::{
    AdaptiveConfig, AdaptiveEngine, AdaptiveHandle, AdaptiveLibrary, AdaptiveLibraryLoader,
    AdaptiveLoadError,
};
pub use attach::{AttachResult, Delivery, SourceAttacher};
pub use controller::{MediaEvent, PlayStart, PlaybackBlocked, PlaybackController};
pub use generation::{Generation, GenerationToken};
pub use keyboard::{shortcut_for, KeyInput, ShortcutAction};
pub use page::{PostPlayer, UiEvent};
pub use playlist::{EndedOutcome, InvalidPosition, Navigation, PlaylistNavigator};
pub use session::{PlaybackSession, PlaybackState};
pub use snapshot::{SnapshotSurface, SourceElement};
pub use status::{StatusArea, StatusLevel};
pub use surface::{FullscreenError, MediaDiagnostics, PlayRejection, PlaybackSurface};
pub use ui::{format_time, Fit, MuteIcon, PlayIcon, UiState};
