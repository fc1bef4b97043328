use std::process;

use anyhow::Result;
use clap::{ArgMatches, Command};

fn main() -> Result<()> {
    let args = clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("install").about("Install solution-rename binary locally"))
        .subcommand(
            Command::new("run")
                .about("Build and run solution-rename with arguments")
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .arg(clap::Arg::new("args")
                    .help("Arguments to pass to solution-rename")
                    .action(clap::ArgAction::Append)
                    .num_args(0..))
        )
        .subcommand(
            Command::new("test")
                .about("Test Operations")
                .subcommand(Command::new("all").about("Run all tests for the entire project"))
                .subcommand(Command::new("core").about("Run tests for solution-rename-core"))
                .subcommand(Command::new("bin").about("Run tests for solution-rename-bin"))
                .subcommand(Command::new("integration").about("Run integration tests"))
        )
        .get_matches();

    match args.subcommand() {
        Some(("install", args)) => handle_install_command(args),
        Some(("run", args)) => handle_run_command(args),
        Some(("test", args)) => handle_test_commands(args),
        Some((command, _)) => anyhow::bail!("Unexpected command: {command}"),
        None => anyhow::bail!("Expected subcommand"),
    }
}

fn handle_install_command(_args: &ArgMatches) -> Result<()> {
    println!("Installing solution-rename...");
    let status = process::Command::new("cargo")
        .args(["install", "--path", "crates/solution-rename-bin"])
        .status()?;

    if status.success() {
        println!("✓ solution-rename installed successfully");
    } else {
        anyhow::bail!("Failed to install solution-rename");
    }

    Ok(())
}

fn handle_run_command(args: &ArgMatches) -> Result<()> {
    println!("Building and running solution-rename...");
    
    // Get any additional arguments passed to run command
    let run_args: Vec<String> = args.get_many::<String>("args")
        .map_or(Vec::new(), |vals| vals.cloned().collect());

    let mut command = process::Command::new("cargo");
    command.args(["run", "--bin", "solution-rename", "--"]);
    
    if !run_args.is_empty() {
        command.args(&run_args);
    }

    let status = command.status()?;

    if !status.success() {
        anyhow::bail!("Failed to run solution-rename");
    }

    Ok(())
}

fn handle_test_commands(args: &ArgMatches) -> Result<()> {
    match args.subcommand() {
        Some(("all", _args)) => test_all(),
        Some(("core", _args)) => test_core(),
        Some(("bin", _args)) => test_bin(),
        Some(("integration", _args)) => test_integration(),
        _ => {
            println!("Available test commands:");
            println!("  all          - Run all tests for the entire project");
            println!("  core         - Run tests for solution-rename-core");
            println!("  bin          - Run tests for solution-rename-bin");
            println!("  integration  - Run integration tests");
            Ok(())
        }
    }
}

fn test_all() -> Result<()> {
    println!("🧪 Running all tests for the solution-rename project...\n");

    let suites: [(&str, fn() -> Result<()>); 4] = [
        ("solution-rename-core", test_core),
        ("solution-rename-bin", test_bin),
        ("documentation", test_docs),
        ("integration", test_integration),
    ];

    let mut failed = Vec::new();
    for (name, suite) in suites {
        match suite() {
            Ok(()) => println!("✅ {name} tests passed\n"),
            Err(err) => {
                println!("❌ {name} tests failed: {err:?}\n");
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        println!("💥 Failed suites: {}", failed.join(", "));
        anyhow::bail!("Test suite failed");
    }

    println!("🎉 All tests passed successfully!");
    Ok(())
}

fn test_core() -> Result<()> {
    println!("🧪 Running solution-rename-core tests...");
    cargo(&["test", "--package", "solution-rename-core"], "Core tests failed")
}

fn test_bin() -> Result<()> {
    println!("🧪 Running solution-rename-bin tests...");
    cargo(&["test", "--package", "solution-rename-bin"], "Binary tests failed")
}

fn test_docs() -> Result<()> {
    println!("📖 Running documentation tests...");
    cargo(&["test", "--doc", "--package", "solution-rename-core"], "Documentation tests failed")
}

fn test_integration() -> Result<()> {
    println!("🔗 Running integration tests...");
    cargo(&["build", "--bin", "solution-rename"], "Failed to build solution-rename binary")?;

    cargo(&["run", "--bin", "solution-rename", "--", "--help"], "CLI help command failed")?;
    cargo(&["run", "--bin", "solution-rename", "--", "--version"], "CLI version command failed")?;

    // A dry run over our own sources must succeed without touching anything
    cargo(
        &["run", "--bin", "solution-rename", "--", "SolutionRenameSmoke", "SolutionRenameCheck", "crates", "--dry-run", "--quiet"],
        "CLI dry run failed",
    )?;

    let status = process::Command::new("cargo")
        .args(["run", "--quiet", "--bin", "solution-rename", "--", "Contoso", "Fabrikam", "does-not-exist"])
        .status()?;
    if status.code() != Some(2) {
        anyhow::bail!("Expected usage error for a missing path, got {status}");
    }

    Ok(())
}

fn cargo(args: &[&str], failure: &str) -> Result<()> {
    let status = process::Command::new("cargo").args(args).status()?;

    if !status.success() {
        anyhow::bail!("{failure}");
    }
    Ok(())
}
