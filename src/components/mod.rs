//! Maud HTML components for the post viewing page.
//!
//! - `layout`: Document skeleton and embedded player settings
//! - `metadata`: Link-preview (Open Graph, Twitter card) tags
//! - `media`: Player shell with the fixed element ids the player drives
//! - `playlist_controls`: Prev/next, index input, fit and quality toggles
//! - `download_panel`: Host-tagged download anchors
//! - `post`: Title, date and description
//! - `alert`: Status line and error alerts
//! - `page`: Complete post and error pages
//!
//! # Example
//!
//! ```ignore
//! use crate::components::PostPage;
//!
//! let html = PostPage::new(&post, "https://example.com/post/abc.html")
//!     .render()
//!     .into_string();
//! ```

pub mod alert;
pub mod download_panel;
pub mod layout;
pub mod media;
pub mod metadata;
pub mod page;
pub mod playlist_controls;
pub mod post;

pub use alert::{Alert, StatusLine};
pub use download_panel::{DownloadItem, DownloadPanel, EMPTY_DOWNLOADS_HINT};
pub use layout::PageLayout;
pub use media::PlayerShell;
pub use metadata::PreviewMetadata;
pub use page::{ErrorPage, PostPage};
pub use playlist_controls::PlaylistControls;
pub use post::{sanitize_description, PostDetails};

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
