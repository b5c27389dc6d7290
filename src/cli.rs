//! Command line interface of the `transcriber` binary, built on clap.
//!
//! Defines [`Cli`] with the [`Command`] subcommands (guide, replay,
//! interactive) and the global flags (--config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Guided transcription of specimen label images, field by field.
#[derive(Debug, Parser)]
#[command(name = "transcriber", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./transcriber.toml when present).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log every workflow transition.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists the configured guide steps.
    Guide,

    /// Replays a JSON or TOML action script and prints each resulting state.
    Replay {
        /// Path to the script file.
        script: PathBuf,

        /// Print snapshots and finished records as JSON lines.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Runs a session on stdin. Plain lines are field values; commands start with `:`.
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_replay_subcommand() {
        let cli = Cli::parse_from(["transcriber", "replay", "session.json", "--json"]);
        match cli.command {
            Command::Replay { script, json } => {
                assert_eq!(script, PathBuf::from("session.json"));
                assert!(json);
            }
            _ => panic!("expected Replay command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "transcriber",
            "--config",
            "calbug.toml",
            "--verbose",
            "interactive",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("calbug.toml")));
        assert!(matches!(cli.command, Command::Interactive));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
