//! Conversation host wire format.
//!
//! The host posts a request envelope per turn and expects a response
//! envelope back. Conversation state rides along in `sessionAttributes`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use neo_chat::{ConversationState, OutputSpeech, SessionInfo, SkillRequest, SkillResponse};

use crate::error::ApiError;

pub const ENVELOPE_VERSION: &str = "1.0";

const LAUNCH_REQUEST: &str = "LaunchRequest";
const INTENT_REQUEST: &str = "IntentRequest";
const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";
const DAY_SLOT: &str = "day";

// =============================================================================
// Request envelope
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Session,
    pub request: RequestBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub intent: Option<IntentBody>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentBody {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl RequestEnvelope {
    pub fn session_info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.session.session_id.clone(),
            request_id: self.request.request_id.clone(),
            is_new: self.session.new,
        }
    }

    /// Conversation state carried in the session attributes.
    pub fn state(&self) -> ConversationState {
        match self.session.attributes {
            Some(ref attrs) => ConversationState::from_attributes(attrs),
            None => ConversationState::default(),
        }
    }

    /// Translate the request body into a [`SkillRequest`].
    pub fn skill_request(&self) -> Result<SkillRequest, ApiError> {
        match self.request.kind.as_str() {
            LAUNCH_REQUEST => Ok(SkillRequest::Launch),
            INTENT_REQUEST => {
                let intent = self.request.intent.as_ref().ok_or_else(|| {
                    ApiError::BadRequest("IntentRequest without an intent".to_string())
                })?;
                let day = intent
                    .slots
                    .get(DAY_SLOT)
                    .and_then(|slot| slot.value.clone());
                Ok(SkillRequest::Intent {
                    name: intent.name.clone(),
                    day,
                })
            }
            SESSION_ENDED_REQUEST => Ok(SkillRequest::SessionEnded {
                reason: self.request.reason.clone(),
            }),
            other => Err(ApiError::BadRequest(format!(
                "unsupported request type: {}",
                other
            ))),
        }
    }
}

// =============================================================================
// Response envelope
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Map<String, Value>,
    pub response: ResponseBody,
}

/// Empty when the host expects no reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    pub fn new(response: Option<SkillResponse>, state: &ConversationState) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: state.to_attributes(),
            response: response.map(ResponseBody::from).unwrap_or_default(),
        }
    }
}

impl From<SkillResponse> for ResponseBody {
    fn from(resp: SkillResponse) -> Self {
        Self {
            output_speech: Some(resp.output_speech),
            card: resp.card.map(|card| CardBody {
                kind: "Simple".to_string(),
                title: card.title,
                content: card.content,
            }),
            reprompt: resp.reprompt.map(|output_speech| Reprompt { output_speech }),
            should_end_session: Some(resp.should_end_session),
        }
    }
}
