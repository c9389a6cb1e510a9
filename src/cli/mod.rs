pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Top headlines in your terminal", long_about = None)]
pub struct Cli {
    /// Two-letter country code for the headlines
    #[arg(short, long, global = true)]
    pub country: Option<String>,

    /// newsapi.org API key (overrides NEWSDESK_API_KEY and the config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            country: self.country.clone(),
            api_key: self.api_key.clone(),
        }
    }

    /// The subcommand to run; the TUI when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch the TUI
    Tui,
    /// Fetch the headlines once and print them
    Headlines {
        /// Print the parsed headlines as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::try_parse_from(["newsdesk"]).unwrap();
        assert_eq!(cli.command(), Commands::Tui);
        assert!(cli.overrides().country.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "newsdesk",
            "headlines",
            "--json",
            "--country",
            "gb",
            "--api-key",
            "k",
        ])
        .unwrap();

        assert_eq!(cli.command(), Commands::Headlines { json: true });
        let overrides = cli.overrides();
        assert_eq!(overrides.country.as_deref(), Some("gb"));
        assert_eq!(overrides.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_config_path_command() {
        let cli = Cli::try_parse_from(["newsdesk", "--config", "/tmp/n.toml", "config-path"]).unwrap();
        assert_eq!(cli.command(), Commands::ConfigPath);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/n.toml")));
    }
}
