//! Shared constants used across the application.

use std::time::Duration;

/// Feed location used when `FEED_URL` is not set.
pub const DEFAULT_FEED_URL: &str = "http://localhost:8080/data/posts.json";

/// Known-good stream loaded when a post has nothing playable.
pub const PLACEHOLDER_STREAM_URL: &str =
    "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4";

/// Script URL of the adaptive-streaming (HLS) library, loaded on first manifest.
pub const ADAPTIVE_LIBRARY_URL: &str = "https://cdn.jsdelivr.net/npm/hls.js@1.5.0/dist/hls.min.js";

/// How long an attach waits for `loadedmetadata`/`canplay` before giving up.
pub const READY_TIMEOUT: Duration = Duration::from_millis(4000);

/// How long the volume percentage indicator stays on screen.
pub const VOLUME_INDICATOR_DURATION: Duration = Duration::from_millis(900);

/// Keyboard seek step.
pub const SEEK_STEP_SECS: f64 = 10.0;

/// Keyboard volume step.
pub const VOLUME_STEP: f64 = 0.05;

/// Vertical drag distance (in CSS pixels) covering the full volume range.
pub const VOLUME_DRAG_RANGE_PX: f64 = 160.0;

/// Playback rates cycled by the speed control.
pub const PLAYBACK_RATES: [f64; 4] = [1.0, 1.25, 1.5, 2.0];

/// Filenames longer than this are elided in the download panel.
pub const FILENAME_DISPLAY_LIMIT: usize = 48;

/// Adaptive buffer target handed to the streaming library.
pub const ADAPTIVE_MAX_BUFFER: Duration = Duration::from_secs(30);

/// MIME type used when a manifest is handed to the runtime directly.
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";
