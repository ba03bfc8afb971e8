//! Error types for the conversational core.

/// Errors surfaced to the conversation host.
///
/// Feed failures never appear here; they are turned into an apology inside
/// the pagination engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("unknown intent: {0}")]
    UnknownIntent(String),
}
