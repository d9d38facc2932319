use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{SentiscopeError, SentiscopeResult};

#[derive(Parser, Debug)]
#[command(
    name = "sentiscope",
    about = "Terminal client for sentiment analysis services",
    version = "0.1.0"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Append logs to this file; without it the interactive screen stays
    /// log-free and one-shot commands log to stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one text and print the outcome
    Analyze {
        /// Text to send to the classifier
        text: String,
    },

    /// Check that the configured sentiment service is reachable
    Check,
}

impl Cli {
    /// Validate CLI configuration and return appropriate error if invalid
    pub fn validate(&self) -> SentiscopeResult<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SentiscopeError::cli(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                )));
            }
        }

        if let Some(ref log_file) = self.log_file {
            if let Some(parent) = log_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.is_dir() {
                    return Err(SentiscopeError::cli(format!(
                        "Log directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get log level as tracing::Level
    pub fn get_tracing_level(&self) -> tracing::Level {
        match self.log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_tui_mode_with_info_level() {
        let cli = Cli::parse_from(["sentiscope"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.get_tracing_level(), tracing::Level::INFO);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn analyze_subcommand_captures_text() {
        let cli = Cli::parse_from(["sentiscope", "analyze", "what a day"]);
        match cli.command {
            Some(Commands::Analyze { ref text }) => assert_eq!(text, "what a day"),
            _ => panic!("expected analyze subcommand"),
        }
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let cli = Cli::parse_from(["sentiscope", "--log-level", "loud"]);
        let err = cli.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }
}
