//! Shared helpers: validation rules and user-facing messages.

pub mod error_messages;
pub mod validation;
