pub mod config;
pub mod error;
pub mod types;

pub use config::NeoConfig;
pub use error::{NeoError, Result};
pub use types::*;
