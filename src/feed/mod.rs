//! Post feed loading and per-page post lookup.

mod loader;
mod lookup;
mod models;

pub use loader::{parse_feed, FeedLoader, FetchError};
pub use lookup::{find_post, NotFoundError, PageContext};
pub use models::{FeedDocument, FeedEnvelope, Post};
