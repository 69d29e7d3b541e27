use std::path::PathBuf;

use clap::Parser;

/// Coursemate: answers questions about course materials.
#[derive(Parser, Debug)]
#[command(name = "coursemate", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. debug, coursemate=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// JSON course catalog to load at startup.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Answer a single question and exit.
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Clear stored course data before loading the catalog.
    #[arg(long)]
    pub clear: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::parse_from([
            "coursemate",
            "--config",
            "/tmp/c.toml",
            "--log-level",
            "debug",
            "--catalog",
            "courses.json",
            "-q",
            "What is MCP?",
            "--clear",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.catalog, Some(PathBuf::from("courses.json")));
        assert_eq!(args.query.as_deref(), Some("What is MCP?"));
        assert!(args.clear);
    }

    #[test]
    fn defaults_to_interactive() {
        let args = Args::parse_from(["coursemate"]);
        assert!(args.query.is_none());
        assert!(!args.clear);
    }
}
