//! NeoWs feed access for the asteroid tracker.
//!
//! `client` fetches raw feed JSON over HTTP; `extract` turns that JSON into
//! an ordered [`neo_core::EventSequence`] for one date.

pub mod client;
pub mod error;
pub mod extract;

pub use client::{FeedSource, NeoWsClient};
pub use error::{FeedError, FetchError, MalformedFeedError};
pub use extract::extract_events;
