//! Video post player library.
//!
//! Resolves a post from a JSON feed, splits its links into playable streams
//! and download links, drives playback of the streams through a
//! [`player::PlaybackSurface`], and renders the post viewing page.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod components;
pub mod config;
pub mod constants;
pub mod feed;
pub mod links;
pub mod player;
