//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the `clap` crate.

use clap::{Parser, Subcommand};

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cargo xtask")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Developer toolkit for the Campus Activities workspace")]
pub struct Cli {
    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Install cargo-llvm-cov, cargo-nextest and the llvm-tools component
    Setup {},
    /// Fetch dependencies, then run tests with coverage (workspace by default)
    Test {
        /// Run tests for a specific crate (auto-prefixes with 'campus-' if missing)
        project: Option<String>,
        /// Skip coverage instrumentation and reports
        #[arg(long)]
        no_coverage: bool,
    },
    /// Run doc tests (workspace by default)
    Doctest {
        /// Run doc tests for a specific crate (auto-prefixes with 'campus-' if missing)
        project: Option<String>,
    },
    /// Run a project
    Run {
        /// Run a specific crate (auto-prefixes with 'campus-' if missing)
        #[arg(default_value = "server")]
        project: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parses_flags() {
        let cli = Cli::parse_from(["xtask", "test", "activities", "--no-coverage"]);
        let AppCommands::Test { project, no_coverage } = cli.command else {
            panic!("expected test command");
        };
        assert_eq!(project.as_deref(), Some("activities"));
        assert!(no_coverage);
    }

    #[test]
    fn run_defaults_to_server() {
        let cli = Cli::parse_from(["xtask", "run"]);
        assert!(matches!(cli.command, AppCommands::Run { project } if project == "server"));
    }
}
