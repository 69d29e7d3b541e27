//! Full configuration validation.
//!
//! Checks every numeric range and collects all problems into a single
//! `ConfigError` so a user sees everything wrong with a file at once.

mod helpers;


use crate::schema::CoursemateConfig;
use coursemate_common::ConfigError;

use helpers::Violations;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &CoursemateConfig) -> Result<(), ConfigError> {
    let mut violations = Violations::default();

    validate_ai(&mut violations, config);
    validate_search(&mut violations, config);
    violations.range("session.max_history", config.session.max_history, 0..=100);

    let errors = violations.into_messages();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_ai(v: &mut Violations, config: &CoursemateConfig) {
    let ai = &config.ai;
    v.non_blank("ai.model", &ai.model);
    v.range("ai.max_tokens", ai.max_tokens, 1..=8192);
    v.range("ai.temperature", ai.temperature, 0.0..=1.0);
    v.range("ai.max_tool_rounds", ai.max_tool_rounds, 1..=10);
}

fn validate_search(v: &mut Violations, config: &CoursemateConfig) {
    let search = &config.search;
    v.range("search.max_results", search.max_results, 1..=100);
    v.range("search.embedding_dimensions", search.embedding_dimensions, 16..=4096);
    v.range("search.resolve_max_distance", search.resolve_max_distance, 0.0..=2.0);
}
