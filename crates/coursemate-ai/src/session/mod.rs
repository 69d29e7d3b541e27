//! Conversation session storage.
//!
//! Sessions live only in process memory: ids come from a per-manager
//! counter (`session_1`, `session_2`, ...) that restarts with the process.
//! The manager does no locking of its own; callers hand out `&mut` access
//! one request at a time.

mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use manager::SessionManager;
pub use types::ChatMessage;
