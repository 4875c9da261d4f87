//! Test pipeline: activate the local cargo home, fetch dependencies, run
//! the tests under `cargo llvm-cov`, then write the terminal and HTML
//! coverage reports.

use crate::services::process::{CommandRunner, Invocation};
use crate::services::utils::{CARGO_HOME_DIR, is_workspace_target, target_args};
use anyhow::bail;
use std::ffi::OsString;
use std::path::Path;

/// Where `cargo llvm-cov report --html` writes; the HTML lands in `html/` below it.
pub const COVERAGE_DIR: &str = "target/coverage";

/// Options for a single `xtask test` run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestOptions<'a> {
    pub project: Option<&'a str>,
    pub no_coverage: bool,
}

/// Environment for child commands: `CARGO_HOME` when the local cargo home exists.
pub fn cargo_home_env(root: &Path) -> Vec<(String, OsString)> {
    let dir = root.join(CARGO_HOME_DIR);
    if dir.is_dir() {
        println!("📦 Using local cargo home: {}", dir.display());
        vec![("CARGO_HOME".to_owned(), dir.into_os_string())]
    } else {
        Vec::new()
    }
}

/// Runs the test pipeline and returns the test runner's exit code.
///
/// A failing `cargo fetch` stops the pipeline and its code is returned.
/// Coverage reports are written even when tests fail.
///
/// # Errors
/// Returns an error if a command cannot be spawned, or if a coverage
/// report fails after the tests passed.
pub fn run_tests(
    runner: &mut dyn CommandRunner,
    root: &Path,
    options: TestOptions<'_>,
) -> anyhow::Result<i32> {
    let target_label = if is_workspace_target(options.project) { "workspace" } else { "crate" };
    println!("🧪 Running {target_label} tests...");

    let envs = cargo_home_env(root);
    let cargo = |args: &[&str]| Invocation::cargo(args.iter().copied()).envs(&envs).current_dir(root);

    println!("📥 Fetching dependencies...");
    let fetched = runner.run(&cargo(&["fetch"]))?;
    if fetched != 0 {
        eprintln!("❌ Dependency fetch failed with status {fetched}");
        return Ok(fetched);
    }

    let has_nextest = runner.probe(&cargo(&["nextest", "--version"]));
    let has_llvm_cov = runner.probe(&cargo(&["llvm-cov", "--version"]));

    if options.no_coverage || !has_llvm_cov {
        if !has_llvm_cov {
            eprintln!("⚠️  cargo-llvm-cov not found, running tests without coverage.");
            eprintln!("   Run 'cargo xtask setup' to install it.");
        }
        let tests = cargo(&[]).args(plain_test_args(options.project, has_nextest));
        return runner.run(&tests);
    }

    let tests = cargo(&["llvm-cov"]).args(coverage_test_args(options.project, has_nextest));
    println!(
        "🧪 Running tests via '{}' with coverage...",
        if has_nextest { "nextest" } else { "cargo test" }
    );
    let status = runner.run(&tests)?;

    println!("📊 Writing coverage reports...");
    let summary = runner.run(&cargo(&["llvm-cov", "report"]))?;
    let html =
        runner.run(&cargo(&["llvm-cov", "report", "--html", "--output-dir", COVERAGE_DIR]))?;

    if summary != 0 || html != 0 {
        if status == 0 {
            bail!("Coverage report generation failed");
        }
        eprintln!("⚠️  Coverage report generation failed");
    } else {
        println!("📊 HTML report: {}", root.join(COVERAGE_DIR).join("html").display());
    }

    if status != 0 {
        eprintln!("❌ Tests failed with status {status}");
    }
    Ok(status)
}

fn runner_args(has_nextest: bool) -> Vec<String> {
    let args: &[&str] = if has_nextest {
        &[
            "--failure-output",
            "immediate-final",
            "--success-output",
            "never",
            "--status-level",
            "skip",
        ]
    } else {
        &[]
    };
    args.iter().map(|a| (*a).to_owned()).collect()
}

fn coverage_test_args(project: Option<&str>, has_nextest: bool) -> Vec<String> {
    let mut args = vec![if has_nextest { "nextest" } else { "test" }.to_owned()];
    args.push("--no-report".to_owned());
    args.extend(target_args(project));
    args.push("--all-features".to_owned());
    args.extend(runner_args(has_nextest));
    args
}

fn plain_test_args(project: Option<&str>, has_nextest: bool) -> Vec<String> {
    let mut args: Vec<String> = if has_nextest {
        vec!["nextest".to_owned(), "run".to_owned()]
    } else {
        vec!["test".to_owned()]
    };
    args.extend(target_args(project));
    args.push("--all-features".to_owned());
    args.extend(runner_args(has_nextest));
    args
}

/// Runs doc tests in the workspace or a specific crate and returns the exit code.
///
/// # Errors
/// Returns an error if `cargo` cannot be spawned.
pub fn run_doctests(
    runner: &mut dyn CommandRunner,
    root: &Path,
    project: Option<&str>,
) -> anyhow::Result<i32> {
    let target_label = if is_workspace_target(project) { "workspace" } else { "crate" };
    println!("📚 Running {target_label} doc tests...");

    let doctests = Invocation::cargo(["test", "--doc"])
        .args(target_args(project))
        .arg("--all-features")
        .envs(&cargo_home_env(root))
        .current_dir(root);

    let status = runner.run(&doctests)?;
    if status != 0 {
        eprintln!("❌ Doc tests failed with status {status}");
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::process::fake::RecordingRunner;
    use std::fs;
    use tempfile::TempDir;

    const ALL_TOOLS: &[&str] = &["llvm-cov", "nextest"];

    fn run(runner: &mut RecordingRunner, root: &Path) -> anyhow::Result<i32> {
        run_tests(runner, root, TestOptions::default())
    }

    #[test]
    fn local_cargo_home_is_activated_before_fetch() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join(CARGO_HOME_DIR)).unwrap();
        let mut runner = RecordingRunner::with_tools(ALL_TOOLS);

        run(&mut runner, root.path()).unwrap();

        let fetch = &runner.runs[runner.position("cargo", &["fetch"]).unwrap()];
        assert_eq!(fetch.env("CARGO_HOME"), Some(&root.path().join(CARGO_HOME_DIR).into_os_string()));
        assert!(runner.runs.iter().all(|inv| inv.env("CARGO_HOME").is_some()));
    }

    #[test]
    fn fetch_runs_without_activation_when_cargo_home_is_absent() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(ALL_TOOLS);

        run(&mut runner, root.path()).unwrap();

        assert!(runner.position("cargo", &["fetch"]).is_some());
        assert!(runner.runs.iter().all(|inv| inv.env("CARGO_HOME").is_none()));
    }

    #[test]
    fn cargo_home_file_is_not_an_environment() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(CARGO_HOME_DIR), "").unwrap();
        assert!(cargo_home_env(root.path()).is_empty());
    }

    #[test]
    fn fetch_precedes_tests_and_reports_follow() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(ALL_TOOLS);

        run(&mut runner, root.path()).unwrap();

        let fetch = runner.position("cargo", &["fetch"]).unwrap();
        let tests = runner.position("cargo", &["llvm-cov", "nextest"]).unwrap();
        let summary = runner.position("cargo", &["llvm-cov", "report"]).unwrap();
        assert_eq!(fetch, 0);
        assert!(fetch < tests && tests < summary);
        assert_eq!(runner.runs.len(), 4);
    }

    #[test]
    fn tests_run_with_coverage_and_both_reports() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(&["llvm-cov"]);

        run(&mut runner, root.path()).unwrap();

        let tests = &runner.runs[1];
        assert!(tests.starts_with("cargo", &["llvm-cov", "test", "--no-report"]));
        assert!(tests.has_arg("--workspace"));

        let reports: Vec<_> =
            runner.runs.iter().filter(|inv| inv.starts_with("cargo", &["llvm-cov", "report"])).collect();
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].has_arg("--html"), "terminal summary first");
        assert!(reports[1].has_arg("--html"));
        assert!(reports[1].has_arg(COVERAGE_DIR));
    }

    #[test]
    fn exit_status_is_the_test_runners() {
        let root = TempDir::new().unwrap();
        let mut runner =
            RecordingRunner::with_tools(ALL_TOOLS).fail("cargo", &["llvm-cov", "nextest"], 100);

        let code = run(&mut runner, root.path()).unwrap();

        assert_eq!(code, 100);
        assert_eq!(
            runner.runs.iter().filter(|inv| inv.starts_with("cargo", &["llvm-cov", "report"])).count(),
            2,
            "reports still written for a failing run"
        );
    }

    #[test]
    fn passing_run_returns_zero() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(ALL_TOOLS);
        assert_eq!(run(&mut runner, root.path()).unwrap(), 0);
    }

    #[test]
    fn failed_fetch_aborts_before_tests() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(ALL_TOOLS).fail("cargo", &["fetch"], 101);

        let code = run(&mut runner, root.path()).unwrap();

        assert_eq!(code, 101);
        assert_eq!(runner.runs.len(), 1);
        assert!(runner.probes.is_empty());
    }

    #[test]
    fn report_failure_after_passing_tests_is_an_error() {
        let root = TempDir::new().unwrap();
        let mut runner =
            RecordingRunner::with_tools(ALL_TOOLS).fail("cargo", &["llvm-cov", "report"], 1);

        let err = run(&mut runner, root.path()).unwrap_err();
        assert!(err.to_string().contains("Coverage report"));
    }

    #[test]
    fn report_failure_keeps_failing_test_status() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(ALL_TOOLS)
            .fail("cargo", &["llvm-cov", "nextest"], 4)
            .fail("cargo", &["llvm-cov", "report"], 1);

        assert_eq!(run(&mut runner, root.path()).unwrap(), 4);
    }

    #[test]
    fn missing_llvm_cov_falls_back_to_plain_tests() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(&[]).fail("cargo", &["test"], 2);

        let code = run(&mut runner, root.path()).unwrap();

        assert_eq!(code, 2);
        assert_eq!(runner.runs.len(), 2);
        assert!(runner.runs[1].starts_with("cargo", &["test", "--workspace"]));
    }

    #[test]
    fn no_coverage_flag_skips_instrumentation() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::with_tools(ALL_TOOLS);

        let options = TestOptions { project: Some("activities"), no_coverage: true };
        run_tests(&mut runner, root.path(), options).unwrap();

        let tests = &runner.runs[1];
        assert!(tests.starts_with("cargo", &["nextest", "run", "-p", "campus-activities"]));
        assert!(runner.position("cargo", &["llvm-cov"]).is_none());
    }

    #[test]
    fn doctests_target_a_single_crate() {
        let root = TempDir::new().unwrap();
        let mut runner = RecordingRunner::default().fail("cargo", &["test", "--doc"], 3);

        let code = run_doctests(&mut runner, root.path(), Some("kernel")).unwrap();

        assert_eq!(code, 3);
        assert!(runner.runs[0].starts_with("cargo", &["test", "--doc", "-p", "campus-kernel"]));
    }
}
