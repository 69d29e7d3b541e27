//! Interactive question loop helpers.

use coursemate_rag::{CourseAnalytics, QueryOutcome};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    NewSession,
    Courses,
    Quit,
    Help,
    Empty,
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Empty,
        "/quit" | "/exit" => Command::Quit,
        "/new" => Command::NewSession,
        "/courses" => Command::Courses,
        "/help" => Command::Help,
        question => Command::Ask(question.to_string()),
    }
}

pub const HELP: &str = "Type a question about the course materials.\n\
Commands: /new (fresh session), /courses (list courses), /quit";

/// Answer followed by a numbered source list.
pub fn render_outcome(outcome: &QueryOutcome) -> String {
    let mut out = outcome.answer.clone();
    if !outcome.sources.is_empty() {
        out.push_str("\n\nSources:");
        for (i, source) in outcome.sources.iter().enumerate() {
            match &source.url {
                Some(url) => out.push_str(&format!("\n  {}. {} <{url}>", i + 1, source.text)),
                None => out.push_str(&format!("\n  {}. {}", i + 1, source.text)),
            }
        }
    }
    out
}

pub fn render_analytics(analytics: &CourseAnalytics) -> String {
    if analytics.total_courses == 0 {
        return "No courses loaded.".to_string();
    }
    let mut out = format!("{} course(s):", analytics.total_courses);
    for title in &analytics.course_titles {
        out.push_str(&format!("\n  - {title}"));
    }
    out
}
