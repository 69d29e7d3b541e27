//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# coursemate configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The Anthropic API key is read from ANTHROPIC_API_KEY, never from this file.

[ai]
# model = "claude-sonnet-4-20250514"
# max_tokens = 800         # 1-8192
# temperature = 0.0        # 0.0-1.0
# max_tool_rounds = 2      # 1-10

[search]
# max_results = 5              # 1-100
# embedding_dimensions = 384   # 16-4096
# resolve_max_distance = 1.0   # 0.0-2.0
# catalog_path = "/path/to/courses.json"

[session]
# max_history = 5          # exchanges kept per session, 0-100

[logging]
# level = "INFO"           # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
