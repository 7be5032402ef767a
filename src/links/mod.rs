//! Link classification: which of a post's URLs play in-page and which are
//! offered as downloads.

mod classify;
mod filename;
mod sources;

pub use classify::{
    classify, extension, is_adaptive_manifest, is_direct_file, is_playable_url, DownloadLink,
    LinkMap, ResolvedLinks,
};
pub use filename::{filename_from_url, truncate_text};
pub use sources::SourceTag;
