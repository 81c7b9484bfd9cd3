// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The engine itself never parses flags; this is the surface a pipeline
//! binary embeds and hands to [`driver::main`](crate::driver::main).

use clap::{Parser, ValueEnum};

/// Command-line arguments for a flow binary.
#[derive(Debug, Clone, Parser)]
#[command(about = "Run tasks in dependency order.", long_about = None)]
pub struct CliArgs {
    /// Tasks to run. Empty means the flow's default task.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Show every task's captured output, not only failures.
    #[arg(short, long)]
    pub verbose: bool,

    /// List registered tasks and exit.
    #[arg(long)]
    pub list: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FLOWDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tasks_and_flags() {
        let args =
            CliArgs::try_parse_from(["pipeline", "-v", "build", "test"]).unwrap();
        assert!(args.verbose);
        assert!(!args.list);
        assert_eq!(args.tasks, ["build", "test"]);
    }

    #[test]
    fn defaults_to_no_tasks() {
        let args = CliArgs::try_parse_from(["pipeline"]).unwrap();
        assert!(args.tasks.is_empty());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn accepts_a_log_level() {
        let args =
            CliArgs::try_parse_from(["pipeline", "--log-level", "debug"]).unwrap();
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
