//! Cursor state machine over a date's asteroids.
//!
//! States:
//! - no sequence fetched yet (`ConversationState::sequence` is `None`)
//! - active, `0 <= cursor <= len`
//! - exhausted, recognised when `cursor == len`
//!
//! Transitions take the current state by value and hand back the next one;
//! persisting it between turns is the caller's job.

use chrono::NaiveDate;
use neo_core::types::EventSequence;
use neo_feed::{extract_events, FeedError, FeedSource};

use crate::types::{ConversationState, PageResult};

/// Outcome of a first-page request.
#[derive(Clone, Debug, PartialEq)]
pub enum FirstPage {
    Ready { date: NaiveDate, page: PageResult },
    /// Fetch failed, the feed was malformed, or the date had no asteroids.
    Unavailable,
}

/// Outcome of a next-page request.
#[derive(Clone, Debug, PartialEq)]
pub enum NextPage {
    /// Nothing was fetched in this session yet.
    NoSequence,
    /// Every record has already been narrated.
    Exhausted,
    Page(PageResult),
}

/// Pages through an [`EventSequence`] `page_size` records at a time.
#[derive(Clone, Debug)]
pub struct PaginationEngine {
    page_size: usize,
}

impl PaginationEngine {
    /// A page size of zero is raised to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch and narrate the first page for `date`.
    ///
    /// Always re-fetches and restarts from the first record. On failure the
    /// incoming state is returned untouched.
    pub async fn request_first_page(
        &self,
        source: &dyn FeedSource,
        date: NaiveDate,
        state: ConversationState,
    ) -> (ConversationState, FirstPage) {
        match load_sequence(source, date).await {
            Ok(sequence) if !sequence.is_empty() => {
                let (state, page) = self.begin(sequence);
                (state, FirstPage::Ready { date, page })
            }
            Ok(_) => {
                tracing::info!(date = %date, "Feed lists no asteroids for date");
                (state, FirstPage::Unavailable)
            }
            Err(e) => {
                tracing::warn!(date = %date, error = %e, "Could not load asteroid feed");
                (state, FirstPage::Unavailable)
            }
        }
    }

    /// Start a fresh conversation over `sequence` and narrate its first page.
    pub fn begin(&self, sequence: EventSequence) -> (ConversationState, PageResult) {
        let page = self.narrate(&sequence, 0);
        let cursor = page.records.len();
        let state = ConversationState {
            sequence: Some(sequence),
            cursor,
        };
        (state, page)
    }

    /// Narrate the records after the cursor and advance past them.
    pub fn request_next_page(&self, state: ConversationState) -> (ConversationState, NextPage) {
        if state.is_exhausted() {
            return (state, NextPage::Exhausted);
        }
        let page = match state.sequence.as_ref() {
            None => return (state, NextPage::NoSequence),
            Some(sequence) => self.narrate(sequence, state.cursor),
        };
        let cursor = state.cursor + page.records.len();
        (ConversationState { cursor, ..state }, NextPage::Page(page))
    }

    fn narrate(&self, sequence: &EventSequence, cursor: usize) -> PageResult {
        let records = sequence
            .slice(cursor, cursor.saturating_add(self.page_size))
            .to_vec();
        let has_more = cursor + records.len() < sequence.len();
        PageResult {
            start: cursor,
            records,
            has_more,
        }
    }
}

impl Default for PaginationEngine {
    fn default() -> Self {
        Self::new(1)
    }
}

async fn load_sequence(
    source: &dyn FeedSource,
    date: NaiveDate,
) -> Result<EventSequence, FeedError> {
    let raw = source.fetch_feed(date).await?;
    Ok(extract_events(&raw, date)?)
}

// =============================================================================
// Tests
// =============================================================================
