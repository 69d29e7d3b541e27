//! Violation collector shared by the section validators.

use std::fmt::Display;
use std::ops::RangeInclusive;

/// Accumulates human-readable problems keyed by their dotted config name.
#[derive(Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    /// Record `name` when `value` falls outside `bounds`. NaN is never in range.
    pub(crate) fn range<T>(&mut self, name: &str, value: T, bounds: RangeInclusive<T>)
    where
        T: PartialOrd + Display,
    {
        if !bounds.contains(&value) {
            self.0.push(format!(
                "{name} = {value} is out of range [{}, {}]",
                bounds.start(),
                bounds.end()
            ));
        }
    }

    pub(crate) fn non_blank(&mut self, name: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.push(format!("{name} must not be empty"));
        }
    }

    pub(crate) fn into_messages(self) -> Vec<String> {
        self.0
    }
}
