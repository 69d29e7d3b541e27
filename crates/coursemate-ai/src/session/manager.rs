//! Session manager: bounded per-session message history.

use std::collections::HashMap;

use tracing::debug;

use crate::Role;

use super::types::ChatMessage;

/// Maps session ids to their ordered, size-bounded message lists.
pub struct SessionManager {
    /// Exchanges retained per session; the message cap is twice this.
    max_history: usize,
    sessions: HashMap<String, Vec<ChatMessage>>,
    session_counter: u64,
}

impl SessionManager {
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            sessions: HashMap::new(),
            session_counter: 0,
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Create an empty session and return its id.
    pub fn create_session(&mut self) -> String {
        self.session_counter += 1;
        let session_id = format!("session_{}", self.session_counter);
        self.sessions.insert(session_id.clone(), Vec::new());
        debug!(session_id = %session_id, "Created session");
        session_id
    }

    /// Append a message, creating the session if it is unknown, then drop
    /// the oldest messages beyond `2 * max_history`.
    pub fn add_message(&mut self, session_id: &str, role: Role, content: impl Into<String>) {
        let limit = self.max_history.saturating_mul(2);
        let messages = self.sessions.entry(session_id.to_string()).or_default();
        messages.push(ChatMessage::new(role, content));

        if messages.len() > limit {
            let excess = messages.len() - limit;
            messages.drain(..excess);
        }
    }

    /// Append a user question followed by the assistant's answer.
    pub fn add_exchange(&mut self, session_id: &str, user_message: &str, assistant_message: &str) {
        self.add_message(session_id, Role::User, user_message);
        self.add_message(session_id, Role::Assistant, assistant_message);
    }

    /// Render a session as `Role: content` lines, or `None` when the id is
    /// missing, unknown, or the session has no messages.
    pub fn get_conversation_history(&self, session_id: Option<&str>) -> Option<String> {
        let messages = self.sessions.get(session_id?)?;
        if messages.is_empty() {
            return None;
        }

        let lines: Vec<String> = messages
            .iter()
            .map(|m| format!("{}: {}", m.label(), m.content))
            .collect();
        Some(lines.join("\n"))
    }

    /// Remove every message from a session but keep the session itself.
    pub fn clear_session(&mut self, session_id: &str) {
        if let Some(messages) = self.sessions.get_mut(session_id) {
            messages.clear();
        }
    }

    pub fn messages(&self, session_id: &str) -> Option<&[ChatMessage]> {
        self.sessions.get(session_id).map(Vec::as_slice)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(5)
    }
}
