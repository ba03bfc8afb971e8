//! Skill orchestrator: central coordinator wiring intents, paging and rendering.
//!
//! Every turn takes the conversation state in and hands the next state back
//! alongside the response, so the caller decides where state lives.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use neo_feed::FeedSource;

use crate::date::{resolve_date, spoken_date};
use crate::error::ChatError;
use crate::format::EventFormatter;
use crate::intent::Intent;
use crate::pagination::{FirstPage, NextPage, PaginationEngine};
use crate::response::{speak, ResponseComposer};
use crate::types::{Card, ConversationState, PageResult, SessionInfo, SkillRequest, SkillResponse};

pub const INFORMATION_TEXT: &str = "With Asteroid Tracker, you can get near earth object events for any day of the year. For example, you could say today, or July fourth. So, which day do you want?";
pub const WELCOME_TEXT: &str = "Welcome to Asteroid Tracker. What day do you want events for?";
pub const APOLOGY_TEXT: &str =
    "There is a problem connecting to the NASA A.P.I at this time. Please try again later.";
pub const NO_MORE_EVENTS_TEXT: &str = "There are no more events for this date. Try another date by saying,  get events for February third.";
pub const GOODBYE_TEXT: &str = "Goodbye";

const FIRST_PAGE_PROMPT: &str = " Wanna go deeper in history?";
const NEXT_PAGE_PROMPT: &str = " Want more events?";
const NEXT_PAGE_CARD_TITLE: &str = "More events on this day in history";

/// Response and follow-up state for one turn.
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    /// `None` when the host expects no reply (session ended).
    pub response: Option<SkillResponse>,
    pub state: ConversationState,
}

/// Dispatches host turns to the paging engine and renders the replies.
pub struct SkillHandler {
    source: Arc<dyn FeedSource>,
    engine: PaginationEngine,
    formatter: EventFormatter,
    composer: ResponseComposer,
    today: fn() -> NaiveDate,
}

impl SkillHandler {
    /// Create a handler reading from `source`, narrating `page_size` asteroids per turn.
    pub fn new(source: Arc<dyn FeedSource>, page_size: usize) -> Self {
        Self {
            source,
            engine: PaginationEngine::new(page_size),
            formatter: EventFormatter::new(),
            composer: ResponseComposer::new(),
            today: local_today,
        }
    }

    /// Replace the clock used when the user names no date.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn page_size(&self) -> usize {
        self.engine.page_size()
    }

    /// Handle one turn.
    ///
    /// Only an unrecognised intent is an error; feed trouble is answered
    /// with an apology.
    pub async fn handle(
        &self,
        session: &SessionInfo,
        request: SkillRequest,
        state: ConversationState,
    ) -> Result<TurnOutcome, ChatError> {
        if session.is_new {
            tracing::info!(
                request_id = %session.request_id,
                session_id = %session.session_id,
                "Session started"
            );
        }

        match request {
            SkillRequest::Launch => {
                tracing::info!(
                    request_id = %session.request_id,
                    session_id = %session.session_id,
                    "Launch"
                );
                Ok(TurnOutcome {
                    response: Some(self.welcome()),
                    state,
                })
            }
            SkillRequest::Intent { name, day } => {
                tracing::info!(
                    request_id = %session.request_id,
                    session_id = %session.session_id,
                    intent = %name,
                    "Intent received"
                );
                let intent = Intent::from_name(&name, day)?;
                Ok(self.handle_intent(intent, state).await)
            }
            SkillRequest::SessionEnded { reason } => {
                tracing::info!(
                    request_id = %session.request_id,
                    session_id = %session.session_id,
                    reason = reason.as_deref().unwrap_or("unknown"),
                    "Session ended"
                );
                Ok(TurnOutcome {
                    response: None,
                    state: ConversationState::default(),
                })
            }
        }
    }

    async fn handle_intent(&self, intent: Intent, state: ConversationState) -> TurnOutcome {
        match intent {
            Intent::GetFirstEvent { day } => {
                let date = resolve_date(day.as_deref(), (self.today)());
                let (state, outcome) = self
                    .engine
                    .request_first_page(self.source.as_ref(), date, state)
                    .await;
                TurnOutcome {
                    response: Some(self.render_first_page(outcome)),
                    state,
                }
            }
            Intent::GetNextEvent => {
                let (state, outcome) = self.engine.request_next_page(state);
                TurnOutcome {
                    response: Some(self.render_next_page(outcome)),
                    state,
                }
            }
            Intent::Help => TurnOutcome {
                response: Some(self.information()),
                state,
            },
            Intent::Stop | Intent::Cancel => TurnOutcome {
                response: Some(self.composer.tell(GOODBYE_TEXT, false)),
                state: ConversationState::default(),
            },
        }
    }

    // -- Rendering --

    fn welcome(&self) -> SkillResponse {
        self.composer
            .ask(WELCOME_TEXT, false, None, INFORMATION_TEXT, false)
    }

    fn information(&self) -> SkillResponse {
        self.composer
            .ask(INFORMATION_TEXT, false, None, INFORMATION_TEXT, false)
    }

    fn render_first_page(&self, outcome: FirstPage) -> SkillResponse {
        let (date, page) = match outcome {
            FirstPage::Ready { date, page } => (date, page),
            FirstPage::Unavailable => {
                return self
                    .composer
                    .ask(APOLOGY_TEXT, false, None, INFORMATION_TEXT, false)
            }
        };

        let day = spoken_date(date);
        let mut speech = format!("<p>For {}</p> ", day);
        let mut card = format!("For {}, ", day);
        for (offset, record) in page.records.iter().enumerate() {
            let event = self.formatter.format(record, page.start + offset);
            speech.push_str(&format!("<p>{}</p> ", event.spoken));
            card.push_str(&event.card);
            card.push('\n');
        }
        if page.has_more {
            speech.push_str(FIRST_PAGE_PROMPT);
            card.push_str(FIRST_PAGE_PROMPT);
        }

        let card = Card {
            title: format!("Asteroids on {}", day),
            content: card,
        };
        self.composer
            .ask(&speak(&speech), true, Some(card), INFORMATION_TEXT, false)
    }

    fn render_next_page(&self, outcome: NextPage) -> SkillResponse {
        match outcome {
            NextPage::NoSequence => self.information(),
            NextPage::Exhausted => {
                self.composer
                    .ask(NO_MORE_EVENTS_TEXT, false, None, INFORMATION_TEXT, false)
            }
            NextPage::Page(page) => {
                let (speech, card) = self.narrate_page(&page);
                let card = Card {
                    title: NEXT_PAGE_CARD_TITLE.to_string(),
                    content: card,
                };
                self.composer
                    .ask(&speak(&speech), true, Some(card), INFORMATION_TEXT, false)
            }
        }
    }

    fn narrate_page(&self, page: &PageResult) -> (String, String) {
        let mut speech = String::new();
        let mut card = String::new();
        for (offset, record) in page.records.iter().enumerate() {
            let event = self.formatter.format(record, page.start + offset);
            speech.push_str(&format!("<p>{}</p> ", event.spoken));
            card.push_str(&event.card);
            card.push(' ');
        }
        if page.has_more {
            speech.push_str(NEXT_PAGE_PROMPT);
            card.push_str(NEXT_PAGE_PROMPT);
        }
        (speech, card)
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputSpeech;
    use async_trait::async_trait;
    use neo_feed::FetchError;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn neo(name: &str, hazardous: bool) -> Value {
        json!({
            "name": name,
            "absolute_magnitude_h": 21.6,
            "estimated_diameter": { "kilometers": {
                "estimated_diameter_min": 0.1234,
                "estimated_diameter_max": 5.6789
            }},
            "is_potentially_hazardous_asteroid": hazardous,
            "close_approach_data": [{
                "relative_velocity": { "kilometers_per_hour": "46952.6427416542" },
                "miss_distance": { "kilometers": "38464628.25" },
                "orbiting_body": "Earth"
            }]
        })
    }

    fn feed_for(day: &str, objects: Vec<Value>) -> Value {
        let mut buckets = serde_json::Map::new();
        buckets.insert(day.to_string(), Value::from(objects.clone()));
        json!({ "element_count": objects.len(), "near_earth_objects": buckets })
    }

    struct StubFeed {
        reply: Option<Value>,
        requested: Mutex<Vec<NaiveDate>>,
    }

    impl StubFeed {
        fn up(reply: Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                requested: Mutex::new(Vec::new()),
            })
        }

        fn down() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl FeedSource for StubFeed {
        async fn fetch_feed(&self, date: NaiveDate) -> Result<Value, FetchError> {
            self.requested.lock().unwrap().push(date);
            self.reply
                .clone()
                .ok_or_else(|| FetchError::Transport("connection refused".to_string()))
        }
    }

    fn handler(feed: Arc<StubFeed>) -> SkillHandler {
        SkillHandler::new(feed, 1).with_clock(fixed_today)
    }

    fn session() -> SessionInfo {
        SessionInfo {
            session_id: "session-1".to_string(),
            request_id: "request-1".to_string(),
            is_new: false,
        }
    }

    fn first(day: Option<&str>) -> SkillRequest {
        SkillRequest::Intent {
            name: "GetFirstEventIntent".to_string(),
            day: day.map(str::to_string),
        }
    }

    fn next() -> SkillRequest {
        SkillRequest::Intent {
            name: "GetNextEventIntent".to_string(),
            day: None,
        }
    }

    fn three_objects() -> Value {
        feed_for(
            "2024-03-05",
            vec![neo("(A)", false), neo("(B)", true), neo("(C)", false)],
        )
    }

    #[tokio::test]
    async fn test_launch_welcomes() {
        let h = handler(StubFeed::up(three_objects()));
        let out = h
            .handle(&session(), SkillRequest::Launch, ConversationState::default())
            .await
            .unwrap();
        let resp = out.response.unwrap();
        assert_eq!(resp.output_speech, OutputSpeech::PlainText { text: WELCOME_TEXT.to_string() });
        assert_eq!(resp.reprompt.unwrap().text(), INFORMATION_TEXT);
        assert!(!resp.should_end_session);
    }

    #[tokio::test]
    async fn test_first_page_speech_and_card() {
        let h = handler(StubFeed::up(three_objects()));
        let out = h
            .handle(&session(), first(None), ConversationState::default())
            .await
            .unwrap();
        assert_eq!(out.state.cursor, 1);

        let resp = out.response.unwrap();
        let expected_event = "Asteroid 0, name is (A),The absolute magnitude is 21.6, \
             the estimated diameter is from 0.12 to 5.68 kilometers,\
             This object is not dangerous,It is traveling at 46952.64 kilometers per hour \
             at a distance of 38464628.25 kilometers and is orbiting Earth";
        assert_eq!(
            resp.output_speech,
            OutputSpeech::Ssml {
                ssml: format!(
                    "<speak><p>For March 5</p> <p>{}</p>  Wanna go deeper in history?</speak>",
                    expected_event
                )
            }
        );
        let card = resp.card.unwrap();
        assert_eq!(card.title, "Asteroids on March 5");
        assert_eq!(
            card.content,
            format!("For March 5, {}\n Wanna go deeper in history?", expected_event)
        );
        assert!(!resp.should_end_session);
        assert_eq!(resp.reprompt.unwrap().text(), INFORMATION_TEXT);
    }

    #[tokio::test]
    async fn test_first_page_uses_day_slot() {
        let feed = StubFeed::up(feed_for("2023-07-04", vec![neo("(A)", false)]));
        let h = handler(feed.clone());
        let out = h
            .handle(&session(), first(Some("2023-07-04")), ConversationState::default())
            .await
            .unwrap();
        assert_eq!(
            *feed.requested.lock().unwrap(),
            vec![NaiveDate::from_ymd_opt(2023, 7, 4).unwrap()]
        );
        let resp = out.response.unwrap();
        assert_eq!(resp.card.unwrap().title, "Asteroids on July 4");
        // Only one object: no continuation prompt.
        assert!(!resp.output_speech.text().contains("Wanna go deeper"));
    }

    #[tokio::test]
    async fn test_first_page_feed_down_apologises() {
        let h = handler(StubFeed::down());
        let out = h
            .handle(&session(), first(None), ConversationState::default())
            .await
            .unwrap();
        let resp = out.response.unwrap();
        assert_eq!(resp.output_speech, OutputSpeech::PlainText { text: APOLOGY_TEXT.to_string() });
        assert!(resp.card.is_none());
        assert!(!resp.should_end_session);
        assert!(out.state.sequence.is_none());
    }

    #[tokio::test]
    async fn test_first_page_no_objects_apologises() {
        let h = handler(StubFeed::up(feed_for("2024-03-05", vec![])));
        let out = h
            .handle(&session(), first(None), ConversationState::default())
            .await
            .unwrap();
        let resp = out.response.unwrap();
        assert_eq!(resp.output_speech.text(), APOLOGY_TEXT);
        assert!(resp.card.is_none());
        assert!(out.state.sequence.is_none());
    }

    #[tokio::test]
    async fn test_walk_through_all_pages() {
        let h = handler(StubFeed::up(three_objects()));
        let out = h
            .handle(&session(), first(None), ConversationState::default())
            .await
            .unwrap();

        let out = h.handle(&session(), next(), out.state).await.unwrap();
        assert_eq!(out.state.cursor, 2);
        let resp = out.response.unwrap();
        let speech = resp.output_speech.text().to_string();
        assert!(speech.starts_with("<speak><p>Asteroid 1, name is (B),"));
        assert!(speech.contains("This object is dangerous!"));
        assert!(speech.ends_with("</p>  Want more events?</speak>"));
        let card = resp.card.unwrap();
        assert_eq!(card.title, "More events on this day in history");
        assert!(card.content.ends_with("Earth  Want more events?"));

        let out = h.handle(&session(), next(), out.state).await.unwrap();
        assert_eq!(out.state.cursor, 3);
        let speech = out.response.unwrap().output_speech.text().to_string();
        assert!(speech.contains("Asteroid 2, name is (C),"));
        assert!(!speech.contains("Want more events?"));

        let out = h.handle(&session(), next(), out.state).await.unwrap();
        assert_eq!(out.state.cursor, 3);
        let resp = out.response.unwrap();
        assert_eq!(resp.output_speech.text(), NO_MORE_EVENTS_TEXT);
        assert!(resp.card.is_none());
        assert!(!resp.should_end_session);
    }

    #[tokio::test]
    async fn test_next_without_first_gives_information() {
        let h = handler(StubFeed::up(three_objects()));
        let out = h
            .handle(&session(), next(), ConversationState::default())
            .await
            .unwrap();
        assert_eq!(out.response.unwrap().output_speech.text(), INFORMATION_TEXT);
        assert_eq!(out.state, ConversationState::default());
    }

    #[tokio::test]
    async fn test_help_keeps_state() {
        let h = handler(StubFeed::up(three_objects()));
        let started = h
            .handle(&session(), first(None), ConversationState::default())
            .await
            .unwrap();
        let help = SkillRequest::Intent {
            name: "AMAZON.HelpIntent".to_string(),
            day: None,
        };
        let out = h.handle(&session(), help, started.state.clone()).await.unwrap();
        assert_eq!(out.state, started.state);
        let resp = out.response.unwrap();
        assert_eq!(resp.output_speech.text(), INFORMATION_TEXT);
        assert!(!resp.should_end_session);
    }

    #[tokio::test]
    async fn test_stop_and_cancel_say_goodbye() {
        let h = handler(StubFeed::up(three_objects()));
        for name in ["AMAZON.StopIntent", "AMAZON.CancelIntent"] {
            let req = SkillRequest::Intent {
                name: name.to_string(),
                day: None,
            };
            let out = h
                .handle(&session(), req, ConversationState::default())
                .await
                .unwrap();
            let resp = out.response.unwrap();
            assert_eq!(resp.output_speech, OutputSpeech::PlainText { text: GOODBYE_TEXT.to_string() });
            assert!(resp.should_end_session);
        }
    }

    #[tokio::test]
    async fn test_unknown_intent_is_error() {
        let h = handler(StubFeed::up(three_objects()));
        let req = SkillRequest::Intent {
            name: "OrderPizzaIntent".to_string(),
            day: None,
        };
        let err = h
            .handle(&session(), req, ConversationState::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::UnknownIntent(ref n) if n == "OrderPizzaIntent"));
    }

    #[tokio::test]
    async fn test_session_ended_has_no_response() {
        let h = handler(StubFeed::up(three_objects()));
        let out = h
            .handle(
                &session(),
                SkillRequest::SessionEnded {
                    reason: Some("USER_INITIATED".to_string()),
                },
                ConversationState::default(),
            )
            .await
            .unwrap();
        assert!(out.response.is_none());
    }

    #[tokio::test]
    async fn test_larger_page_size_narrates_several() {
        let h = SkillHandler::new(StubFeed::up(three_objects()), 2).with_clock(fixed_today);
        let out = h
            .handle(&session(), first(None), ConversationState::default())
            .await
            .unwrap();
        assert_eq!(out.state.cursor, 2);
        let resp = out.response.unwrap();
        let speech = resp.output_speech.text();
        assert!(speech.contains("Asteroid 0, name is (A),"));
        assert!(speech.contains("Asteroid 1, name is (B),"));
        assert!(speech.contains("Wanna go deeper in history?"));
        assert_eq!(resp.card.unwrap().content.matches('\n').count(), 2);
    }
}
