//! Minimal `.env` loading (KEY=VALUE lines).

use std::path::Path;

/// Split one `.env` line into a key and unquoted value.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim().trim_matches('"').trim_matches('\'')))
}

/// Set variables from `path` that are not already present in the environment.
/// Returns the number of variables set.
pub fn load_from(path: &Path) -> usize {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return 0;
    };

    let mut loaded = 0;
    for (key, value) in contents.lines().filter_map(parse_line) {
        if std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
            loaded += 1;
        }
    }
    loaded
}

/// Load `.env` from the working directory.
pub fn load() -> usize {
    load_from(Path::new(".env"))
}
