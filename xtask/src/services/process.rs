//! External command execution.
//!
//! Handlers describe *what* to run as [`Invocation`]s and hand them to a
//! [`CommandRunner`]. The real runner spawns processes; tests substitute a
//! recording runner to check ordering, arguments, and exit-code handling.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Exit code reported when a child was terminated without one (e.g., by a signal).
pub const SIGNALLED_EXIT_CODE: i32 = 1;

/// A single external command with its arguments and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, OsString)>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), envs: Vec::new(), cwd: None }
    }

    /// Shorthand for `cargo <args...>`.
    pub fn cargo<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("cargo").args(args)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn envs(mut self, envs: &[(String, OsString)]) -> Self {
        self.envs.extend_from_slice(envs);
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// `true` if the command line starts with `program` followed by `prefix`.
    pub fn starts_with(&self, program: &str, prefix: &[&str]) -> bool {
        self.program == program
            && self.args.len() >= prefix.len()
            && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    pub fn env(&self, key: &str) -> Option<&OsString> {
        self.envs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).envs(self.envs.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes invocations. Output streams straight to the terminal.
pub trait CommandRunner {
    /// Runs to completion and returns the exit code.
    ///
    /// # Errors
    /// Returns an error only if the process could not be spawned.
    fn run(&mut self, invocation: &Invocation) -> Result<i32>;

    /// Runs silently and reports whether it exited successfully.
    /// Used to detect optional tools.
    fn probe(&mut self, invocation: &Invocation) -> bool;
}

/// Spawns real processes, inheriting stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32> {
        println!("▶ {invocation}");
        let status = invocation
            .to_command()
            .status()
            .with_context(|| format!("Failed to execute '{invocation}'"))?;
        Ok(status.code().unwrap_or(SIGNALLED_EXIT_CODE))
    }

    fn probe(&mut self, invocation: &Invocation) -> bool {
        invocation
            .to_command()
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }
}
