//! Response composition.
//!
//! Wraps speech, card and reprompt into a [`SkillResponse`] with the right
//! session flag. Knows nothing about asteroids.

use crate::types::{Card, OutputSpeech, SkillResponse};

/// Builds host-facing responses.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// A response that keeps the session open and waits for the user.
    pub fn ask(
        &self,
        speech: &str,
        speech_is_ssml: bool,
        card: Option<Card>,
        reprompt: &str,
        reprompt_is_ssml: bool,
    ) -> SkillResponse {
        SkillResponse {
            output_speech: OutputSpeech::new(speech, speech_is_ssml),
            reprompt: Some(OutputSpeech::new(reprompt, reprompt_is_ssml)),
            card,
            should_end_session: false,
        }
    }

    /// A response that ends the session.
    pub fn tell(&self, speech: &str, speech_is_ssml: bool) -> SkillResponse {
        SkillResponse {
            output_speech: OutputSpeech::new(speech, speech_is_ssml),
            reprompt: None,
            card: None,
            should_end_session: true,
        }
    }
}

/// Wrap a markup body in the `<speak>` root element.
pub fn speak(body: &str) -> String {
    format!("<speak>{}</speak>", body)
}
