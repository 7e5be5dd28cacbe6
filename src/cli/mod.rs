//! Command-line interface, parsed with clap.

use clap::{Parser, Subcommand};

/// Recipe Box - recipe search with a local favorites list
#[derive(Debug, Parser)]
#[command(name = "recipebox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "s")]
    Serve,

    /// Write a default config.toml and create empty data tables
    Init,

    /// Load and validate the configuration, then exit
    #[command(alias = "check")]
    CheckConfig,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["recipebox"]);
        assert_eq!(cli.command(), Commands::Serve);
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(Cli::parse_from(["recipebox", "init"]).command(), Commands::Init);
        assert_eq!(
            Cli::parse_from(["recipebox", "check-config"]).command(),
            Commands::CheckConfig
        );
        assert_eq!(Cli::parse_from(["recipebox", "check"]).command(), Commands::CheckConfig);
    }
}
