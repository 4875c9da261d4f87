use crate::services::process::{CommandRunner, Invocation};
use crate::services::utils::normalize_project_name;
use std::path::Path;

/// Runs a workspace binary via `cargo run` and returns its exit code.
///
/// # Errors
/// Returns an error if `cargo` cannot be spawned.
pub fn run_project(
    runner: &mut dyn CommandRunner,
    root: &Path,
    project: &str,
) -> anyhow::Result<i32> {
    println!("🚀 Starting project...");

    let project = normalize_project_name(project);
    let status = runner.run(&Invocation::cargo(["run", "-p", &project]).current_dir(root))?;

    if status != 0 {
        eprintln!("❌ Project exited with non-zero status: {status}");
    }
    Ok(status)
}
