//! Application state shared across all route handlers.
//!
//! The server keeps no per-conversation state; that travels in the
//! envelope's session attributes.

use std::sync::Arc;
use std::time::Instant;

use neo_chat::SkillHandler;

/// Shared application state. Cloned into every handler task.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<SkillHandler>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(handler: SkillHandler) -> Self {
        Self {
            handler: Arc::new(handler),
            start_time: Instant::now(),
        }
    }
}
