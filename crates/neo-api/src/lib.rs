//! HTTP surface of the asteroid tracker skill.
//!
//! Accepts the conversation host's request envelopes on `POST /skill`,
//! threads session attributes through the skill handler, and exposes a
//! health check.

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
