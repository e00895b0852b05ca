//! Core type definitions using newtype patterns for type safety.
//!
//! Identifiers and addresses are validated once at the boundary so the rest
//! of the crate can pass them around without re-checking.

mod email;
mod frequency;
mod tool_id;

pub use email::{EmailAddress, EmailError};
pub use frequency::{Frequency, FrequencyError};
pub use tool_id::{ToolId, ToolIdError};
