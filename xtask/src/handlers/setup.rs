use crate::services::process::{CommandRunner, Invocation};
use anyhow::{Result, bail};

/// Cargo subcommands the test pipeline needs, with their crates.
const REQUIRED_TOOLS: &[(&str, &str)] =
    &[("llvm-cov", "cargo-llvm-cov"), ("nextest", "cargo-nextest")];

/// Rustup components required for coverage instrumentation.
const REQUIRED_COMPONENTS: &[&str] = &["llvm-tools-preview"];

/// Installs the tools used by `cargo xtask test`.
///
/// # Errors
/// Returns an error if an installation command cannot be spawned or fails.
pub fn setup_project(runner: &mut dyn CommandRunner) -> Result<()> {
    println!("🛠️  Starting Campus Activities development setup...");

    for component in REQUIRED_COMPONENTS {
        println!("🦀 Adding rustup component: {component}...");
        run_checked(runner, &Invocation::new("rustup").args(["component", "add", *component]))?;
    }

    for (subcommand, package) in REQUIRED_TOOLS {
        if runner.probe(&Invocation::cargo([*subcommand, "--version"])) {
            println!("✅ {package} is already installed. Trying update...");
        } else {
            println!("📥 Installing {package}...");
        }
        run_checked(runner, &Invocation::cargo(["install", *package, "--locked"]))?;
    }

    println!("\n✨ Setup complete! Run 'cargo xtask test' for tests with coverage.");
    Ok(())
}

fn run_checked(runner: &mut dyn CommandRunner, invocation: &Invocation) -> Result<()> {
    let status = runner.run(invocation)?;
    if status != 0 {
        bail!("Command '{invocation}' failed with status {status}");
    }
    Ok(())
}
