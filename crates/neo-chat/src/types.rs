//! Shared types for the conversational core.

use neo_core::types::{AsteroidRecord, EventSequence};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ATTR_SEQUENCE: &str = "sequence";
const ATTR_INDEX: &str = "index";

// =============================================================================
// ConversationState
// =============================================================================

/// Per-conversation paging state.
///
/// Starts empty, is filled by the first successful fetch, and only ever
/// moves its cursor forward afterwards. `cursor <= sequence.len()` holds
/// whenever a sequence is present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversationState {
    pub sequence: Option<EventSequence>,
    pub cursor: usize,
}

impl ConversationState {
    /// True once every fetched record has been narrated.
    pub fn is_exhausted(&self) -> bool {
        self.sequence
            .as_ref()
            .is_some_and(|seq| self.cursor >= seq.len())
    }

    /// Serialize into the host's session attribute bag.
    pub fn to_attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        if let Some(ref sequence) = self.sequence {
            match serde_json::to_value(sequence) {
                Ok(value) => {
                    attrs.insert(ATTR_SEQUENCE.to_string(), value);
                    attrs.insert(ATTR_INDEX.to_string(), Value::from(self.cursor));
                }
                Err(e) => tracing::warn!(error = %e, "Failed to serialize conversation state"),
            }
        }
        attrs
    }

    /// Rebuild state from session attributes.
    ///
    /// Missing or unreadable attributes yield the empty state. A cursor past
    /// the end of the sequence is clamped.
    pub fn from_attributes(attrs: &Map<String, Value>) -> Self {
        let Some(raw) = attrs.get(ATTR_SEQUENCE) else {
            return Self::default();
        };
        let sequence: EventSequence = match serde_json::from_value(raw.clone()) {
            Ok(seq) => seq,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session attributes");
                return Self::default();
            }
        };
        let cursor = attrs
            .get(ATTR_INDEX)
            .and_then(Value::as_u64)
            .map(|c| c as usize)
            .unwrap_or(0)
            .min(sequence.len());
        Self {
            sequence: Some(sequence),
            cursor,
        }
    }
}

// =============================================================================
// PageResult
// =============================================================================

/// Records narrated in one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct PageResult {
    /// Position of the first narrated record within the sequence.
    pub start: usize,
    pub records: Vec<AsteroidRecord>,
    /// Whether records remain after this page.
    pub has_more: bool,
}

// =============================================================================
// Host-facing request / response
// =============================================================================

/// Identifiers the host attaches to every turn. Used for logging only.
#[derive(Clone, Debug, Default)]
pub struct SessionInfo {
    pub session_id: String,
    pub request_id: String,
    /// True on the first turn of a session.
    pub is_new: bool,
}

/// A turn delivered by the conversation host.
#[derive(Clone, Debug, PartialEq)]
pub enum SkillRequest {
    Launch,
    Intent { name: String, day: Option<String> },
    SessionEnded { reason: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    pub fn new(text: impl Into<String>, is_ssml: bool) -> Self {
        if is_ssml {
            OutputSpeech::Ssml { ssml: text.into() }
        } else {
            OutputSpeech::PlainText { text: text.into() }
        }
    }

    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::PlainText { text } => text,
            OutputSpeech::Ssml { ssml } => ssml,
        }
    }

    pub fn is_ssml(&self) -> bool {
        matches!(self, OutputSpeech::Ssml { .. })
    }
}

/// A simple title + body card shown in the companion app.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub content: String,
}

/// What the host should say, show and do next.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillResponse {
    pub output_speech: OutputSpeech,
    pub reprompt: Option<OutputSpeech>,
    pub card: Option<Card>,
    pub should_end_session: bool,
}
