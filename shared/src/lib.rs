//! Shared utilities and types for the Media2Link backend services

// Re-export common dependencies
pub use anyhow;
pub use chrono;
pub use serde;
pub use serde_json;
pub use thiserror;
pub use tracing;
pub use uuid;

pub mod error;
pub mod observability;

pub use error::{MediaError, MediaResult};
