#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::disallowed_methods,
    clippy::disallowed_types
)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::testing::TestOptions;
use crate::handlers::{run, setup, testing};
use crate::models::args::{AppCommands, Cli};
use crate::services::process::{SIGNALLED_EXIT_CODE, SystemRunner};
use crate::services::utils::get_project_root;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let root = get_project_root()?;
    let mut runner = SystemRunner;

    let status = match cli.command {
        AppCommands::Setup {} => {
            setup::setup_project(&mut runner)?;
            0
        },
        AppCommands::Test { project, no_coverage } => testing::run_tests(
            &mut runner,
            &root,
            TestOptions { project: project.as_deref(), no_coverage },
        )?,
        AppCommands::Doctest { project } => {
            testing::run_doctests(&mut runner, &root, project.as_deref())?
        },
        AppCommands::Run { project } => run::run_project(&mut runner, &root, &project)?,
    };

    Ok(exit_code(status))
}

/// Maps a child status to our own; codes outside `0..=255` become a plain failure.
fn exit_code(status: i32) -> ExitCode {
    u8::try_from(status)
        .or_else(|_| u8::try_from(SIGNALLED_EXIT_CODE))
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
