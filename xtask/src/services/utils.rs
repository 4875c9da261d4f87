use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Prefix shared by every crate in the workspace.
pub const CRATE_PREFIX: &str = "campus";

/// Project-local cargo home; activated for child commands when present.
pub const CARGO_HOME_DIR: &str = ".cargo-home";

/// Returns the root directory of the project.
///
/// # Errors
/// Returns an error if the manifest directory does not have a parent.
pub fn get_project_root() -> Result<PathBuf> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .context("Could not find project root from xtask manifest")
}

/// Normalizes a project crate name to the workspace naming convention.
///
/// `server` becomes `campus-server`; `campus`, `campus-*` and `xtask` are
/// left alone.
#[must_use]
pub fn normalize_project_name(project: &str) -> String {
    let already_named = project == CRATE_PREFIX
        || project == "xtask"
        || project.strip_prefix(CRATE_PREFIX).is_some_and(|rest| rest.starts_with('-'));

    if already_named { project.to_owned() } else { format!("{CRATE_PREFIX}-{project}") }
}

/// `true` when the argument selects the whole workspace.
#[must_use]
pub fn is_workspace_target(project: Option<&str>) -> bool {
    project.is_none_or(|value| value == "all")
}

/// Cargo selection flags for a project argument.
#[must_use]
pub fn target_args(project: Option<&str>) -> Vec<String> {
    match project {
        Some(name) if !is_workspace_target(project) => {
            vec!["-p".to_owned(), normalize_project_name(name)]
        },
        _ => vec!["--workspace".to_owned()],
    }
}
