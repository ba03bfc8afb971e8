//! Conversational core of the asteroid tracker.
//!
//! Resolves the requested date, pages through a date's asteroids across
//! turns, and renders each turn as speech, card, and reprompt.

pub mod date;
pub mod error;
pub mod format;
pub mod intent;
pub mod orchestrator;
pub mod pagination;
pub mod response;
pub mod types;

pub use date::{resolve_date, spoken_date};
pub use error::ChatError;
pub use format::{EventFormatter, FormattedEvent};
pub use intent::Intent;
pub use orchestrator::{SkillHandler, TurnOutcome};
pub use pagination::{FirstPage, NextPage, PaginationEngine};
pub use response::ResponseComposer;
pub use types::{
    Card, ConversationState, OutputSpeech, PageResult, SessionInfo, SkillRequest, SkillResponse,
};
