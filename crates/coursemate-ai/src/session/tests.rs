//! Tests for session creation, truncation, and history rendering.

use super::*;
use crate::Role;

fn manager() -> SessionManager {
    SessionManager::new(3)
}

#[test]
fn default_max_history_is_five() {
    assert_eq!(SessionManager::default().max_history(), 5);
}

#[test]
fn create_session_ids_are_sequential() {
    let mut sm = manager();
    assert_eq!(sm.create_session(), "session_1");
    assert_eq!(sm.create_session(), "session_2");
    assert_eq!(sm.create_session(), "session_3");
    assert_eq!(sm.session_count(), 3);
    assert_eq!(sm.messages("session_2"), Some(&[][..]));
}

#[test]
fn add_message_creates_unknown_session() {
    let mut sm = manager();
    sm.add_message("new_session", Role::User, "Hello");

    assert!(sm.contains("new_session"));
    let messages = sm.messages("new_session").unwrap();
    assert_eq!(messages, &[ChatMessage::new(Role::User, "Hello")]);
}

#[test]
fn add_exchange_matches_two_add_messages() {
    let mut a = manager();
    let mut b = manager();
    let id_a = a.create_session();
    let id_b = b.create_session();

    a.add_exchange(&id_a, "What is AI?", "AI is artificial intelligence.");
    b.add_message(&id_b, Role::User, "What is AI?");
    b.add_message(&id_b, Role::Assistant, "AI is artificial intelligence.");

    assert_eq!(a.messages(&id_a), b.messages(&id_b));
}

#[test]
fn history_truncates_oldest_first() {
    let mut sm = manager();
    let id = sm.create_session();
    for i in 0..10 {
        sm.add_message(&id, Role::User, format!("Message {i}"));
    }

    let messages = sm.messages(&id).unwrap();
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0].content, "Message 4");
    assert_eq!(messages[5].content, "Message 9");
}

#[test]
fn truncation_keeps_whole_exchanges() {
    let mut sm = manager();
    let id = sm.create_session();
    for i in 0..5 {
        sm.add_exchange(&id, &format!("Question {i}"), &format!("Answer {i}"));
    }

    let messages = sm.messages(&id).unwrap();
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0].content, "Question 2");
    assert_eq!(messages[1].content, "Answer 2");
    assert_eq!(messages[5].content, "Answer 4");
}

#[test]
fn length_never_exceeds_twice_max_history() {
    for max_history in 0..4 {
        let mut sm = SessionManager::new(max_history);
        let id = sm.create_session();
        for i in 0..25 {
            let role = if i % 3 == 0 { Role::Assistant } else { Role::User };
            sm.add_message(&id, role, format!("m{i}"));
            assert!(sm.messages(&id).unwrap().len() <= 2 * max_history);
        }
    }
}

#[test]
fn zero_max_history_retains_nothing() {
    let mut sm = SessionManager::new(0);
    let id = sm.create_session();
    sm.add_exchange(&id, "Hello", "Hi");

    assert!(sm.contains(&id));
    assert!(sm.messages(&id).unwrap().is_empty());
    assert_eq!(sm.get_conversation_history(Some(&id)), None);
}

#[test]
fn conversation_history_format() {
    let mut sm = manager();
    let id = sm.create_session();
    sm.add_exchange(&id, "Hello", "Hi there");
    sm.add_exchange(&id, "How are you?", "I'm doing well");

    assert_eq!(
        sm.get_conversation_history(Some(&id)).unwrap(),
        "User: Hello\nAssistant: Hi there\nUser: How are you?\nAssistant: I'm doing well"
    );
}

#[test]
fn conversation_history_absent_cases() {
    let mut sm = manager();
    let id = sm.create_session();

    assert_eq!(sm.get_conversation_history(Some("non_existent")), None);
    assert_eq!(sm.get_conversation_history(None), None);
    assert_eq!(sm.get_conversation_history(Some(&id)), None);
}

#[test]
fn clear_session_keeps_the_session() {
    let mut sm = manager();
    let id = sm.create_session();
    sm.add_exchange(&id, "What is Python?", "A programming language.");

    sm.clear_session(&id);
    assert!(sm.contains(&id));
    assert!(sm.messages(&id).unwrap().is_empty());

    sm.add_exchange(&id, "Hello", "Welcome!");
    let history = sm.get_conversation_history(Some(&id)).unwrap();
    assert!(history.contains("Welcome!"));
    assert!(!history.contains("programming language"));
}

#[test]
fn clear_unknown_session_is_noop() {
    let mut sm = manager();
    sm.clear_session("non_existent");
    assert_eq!(sm.session_count(), 0);
}

#[test]
fn sessions_are_independent() {
    let mut sm = manager();
    let first = sm.create_session();
    let second = sm.create_session();
    sm.add_message(&first, Role::User, "Message in session 1");
    sm.add_message(&second, Role::User, "Message in session 2");

    assert_eq!(sm.messages(&first).unwrap()[0].content, "Message in session 1");
    assert_eq!(sm.messages(&second).unwrap()[0].content, "Message in session 2");
}

#[test]
fn unicode_content_survives_history() {
    let mut sm = manager();
    let id = sm.create_session();
    sm.add_message(&id, Role::User, "Hello 🌍 世界 🚀");

    let history = sm.get_conversation_history(Some(&id)).unwrap();
    assert_eq!(history, "User: Hello 🌍 世界 🚀");
}
