//! Error types for feed fetching and parsing.

/// Network-level failures talking to the feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("feed returned HTTP {0}")]
    Status(u16),
    #[error("feed body is not valid JSON: {0}")]
    Decode(String),
}

/// The feed answered, but not in the shape we expect.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MalformedFeedError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field {field} is not {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
    #[error("element {index} is beyond the {len} objects listed for {date}")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        date: String,
    },
}

/// Anything that keeps a date's asteroids from being read.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Malformed(#[from] MalformedFeedError),
}
