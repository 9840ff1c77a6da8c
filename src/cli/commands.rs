//! Command definitions for the proctor CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::Settings;

// ============================================================================
// CLI Structure
// ============================================================================

/// Proctor Timer - exam countdown with violation tracking
#[derive(Parser, Debug)]
#[command(
    name = "proctor",
    version,
    about = "Exam countdown timer with threshold alerts and violation tracking",
    long_about = "Runs a proctored exam countdown in the terminal.\n\
                  Alerts fire when the remaining time crosses the warning and critical \
                  thresholds, and integrity violations are recorded with timestamps.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive exam session
    Run(RunArgs),

    /// Validate settings and print the effective configuration
    Check(ConfigArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Arguments
// ============================================================================

/// Timer configuration overrides shared by `run` and `check`
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Exam duration in minutes (1-600)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=600)
    )]
    pub duration: Option<u32>,

    /// Warning threshold in minutes before the end
    #[arg(short, long)]
    pub warning: Option<u32>,

    /// Critical threshold in minutes before the end
    #[arg(short, long)]
    pub critical: Option<u32>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Applies the flags on top of loaded settings.
    pub fn apply(&self, settings: Settings) -> Settings {
        settings.with_overrides(self.duration, self.warning, self.critical)
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Disable alert tones
    #[arg(long)]
    pub no_sound: bool,

    /// Show the countdown in the terminal title
    #[arg(long)]
    pub title: bool,

    /// Print the final summary as JSON and suppress live output
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["proctor"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["proctor", "-v", "check"]);
            assert!(cli.verbose);
            assert!(matches!(cli.command, Some(Commands::Check(_))));
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["proctor", "completions", "zsh"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Zsh
                })
            ));
        }

        #[test]
        fn test_unknown_subcommand_fails() {
            assert!(Cli::try_parse_from(["proctor", "daemon"]).is_err());
        }
    }

    mod run_args_tests {
        use super::*;

        fn run_args(args: &[&str]) -> RunArgs {
            let mut argv = vec!["proctor", "run"];
            argv.extend_from_slice(args);
            match Cli::parse_from(argv).command {
                Some(Commands::Run(args)) => args,
                other => panic!("Expected Run command, got {:?}", other),
            }
        }

        #[test]
        fn test_defaults() {
            let args = run_args(&[]);
            assert!(args.config.duration.is_none());
            assert!(args.config.warning.is_none());
            assert!(args.config.critical.is_none());
            assert!(args.config.config.is_none());
            assert!(!args.no_sound);
            assert!(!args.title);
            assert!(!args.json);
        }

        #[test]
        fn test_all_options() {
            let args = run_args(&[
                "--duration",
                "90",
                "--warning",
                "15",
                "--critical",
                "3",
                "--no-sound",
                "--title",
                "--json",
                "--config",
                "/tmp/settings.json",
            ]);
            assert_eq!(args.config.duration, Some(90));
            assert_eq!(args.config.warning, Some(15));
            assert_eq!(args.config.critical, Some(3));
            assert_eq!(
                args.config.config,
                Some(PathBuf::from("/tmp/settings.json"))
            );
            assert!(args.no_sound);
            assert!(args.title);
            assert!(args.json);
        }

        #[test]
        fn test_short_options() {
            let args = run_args(&["-d", "30", "-w", "5", "-c", "1"]);
            assert_eq!(args.config.duration, Some(30));
            assert_eq!(args.config.warning, Some(5));
            assert_eq!(args.config.critical, Some(1));
        }

        #[test]
        fn test_duration_range() {
            assert!(Cli::try_parse_from(["proctor", "run", "--duration", "0"]).is_err());
            assert!(Cli::try_parse_from(["proctor", "run", "--duration", "601"]).is_err());
            assert!(Cli::try_parse_from(["proctor", "run", "--duration", "abc"]).is_err());
        }

        #[test]
        fn test_apply_overrides_settings() {
            let args = run_args(&["--duration", "45"]);
            let settings = args.config.apply(Settings::default());
            assert_eq!(settings.duration_minutes, 45);
            assert_eq!(settings.warning_minutes, 10);
        }
    }
}
