//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Music API smoke-test runner.
///
/// With no arguments, runs the four music API checks against
/// http://localhost:5000 and prints one block per check.
#[derive(Debug, Parser)]
#[command(name = "music-smoke")]
#[command(version)]
pub struct Cli {
    /// Root URL of the music service (overrides settings)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Timeout in seconds applied to every request (overrides settings)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Settings file to read instead of ./music-smoke.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["music-smoke"]).unwrap();
        assert!(cli.base_url.is_none());
        assert!(cli.timeout_secs.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "music-smoke",
            "--base-url",
            "http://127.0.0.1:8080",
            "--timeout-secs",
            "3",
            "--config",
            "smoke.toml",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(cli.timeout_secs, Some(3));
        assert_eq!(cli.config, Some(PathBuf::from("smoke.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["music-smoke", "--timeout-secs", "soon"]).is_err());
    }
}
