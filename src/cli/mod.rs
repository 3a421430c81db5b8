// ABOUTME: CLI argument parsing and command routing for visionhub
//
// Provides command-line interface for:
// - Filling in the membership form (tui, default)
// - Validating a saved form-data file (check)
// - Listing the wizard steps and their fields (steps)
// - Printing the effective configuration (config)

pub mod check;
pub mod config;
pub mod steps;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Vision Hub Tanzania - apply for community membership from the terminal
#[derive(Parser)]
#[command(name = "visionhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Extra config file, applied after all default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui(TuiArgs),

    /// Validate a flat form-data file (JSON object or TOML table)
    Check(CheckArgs),

    /// List the wizard steps and their fields
    Steps,

    /// Print the effective configuration
    Config,
}

/// Arguments for the tui command
#[derive(clap::Args, Default)]
pub struct TuiArgs {
    /// Write the submitted application here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Form-data file to validate
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_tui() {
        let cli = Cli::try_parse_from(["visionhub"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_check_with_global_flags() {
        let cli = Cli::try_parse_from([
            "visionhub",
            "check",
            "form.json",
            "--format",
            "json",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Some(Commands::Check(args)) => assert_eq!(args.file, PathBuf::from("form.json")),
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_tui_output_flag() {
        let cli = Cli::try_parse_from(["visionhub", "tui", "-o", "application.json"]).unwrap();
        match cli.command {
            Some(Commands::Tui(args)) => {
                assert_eq!(args.output, Some(PathBuf::from("application.json")));
            }
            _ => panic!("expected tui command"),
        }
    }
}
