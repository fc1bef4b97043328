mod cli;
mod confirm;
mod diff;
mod report;

use anyhow::Result;
use clap::CommandFactory;
use cli::Cli;
use solution_rename_core::{
    ExcludedDirectories, RenameError, RenameOptions, RenameOutcome, RenameTask,
};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXIT_ROLLED_BACK: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_ROLLBACK_FAILED: u8 = 3;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    setup_logging(&cli)?;

    info!("Starting solution-rename");

    let root = match &cli.path {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let task = match RenameTask::new(&cli.old_name, &cli.new_name, root) {
        Ok(task) => task,
        Err(error) => {
            print_invalid_task(&error);
            return Ok(ExitCode::from(EXIT_USAGE));
        }
    };

    let options = RenameOptions {
        dry_run: cli.dry_run,
        excluded: cli
            .exclude
            .iter()
            .fold(ExcludedDirectories::default(), |excluded, marker| {
                excluded.with_marker(marker.as_str())
            }),
        ..RenameOptions::default()
    };

    info!("Target directory: {:?}", task.root());
    info!("Excluded directories: {:?}", options.excluded.markers());

    if options.dry_run {
        warn!("Dry run mode - no changes will be made");
    } else {
        confirm::print_prompt(task.old_token(), task.new_token(), task.root())?;
        if !confirm::read_response()?.proceeds() {
            report::print_aborted();
            return Ok(ExitCode::SUCCESS);
        }
    }

    let show_diffs = cli.dry_run && cli.verbose;
    let outcome = solution_rename_core::run_with(&task, &options, |path, old, new| {
        if show_diffs {
            print!("{}", diff::render_content_diff(path, old, new));
        }
    });

    match outcome {
        RenameOutcome::Completed(result) => {
            report::print_success(&result);
            info!("solution-rename completed successfully");
            Ok(ExitCode::SUCCESS)
        }
        RenameOutcome::RolledBack { error, rollback } => {
            report::print_failure(&error, &rollback);
            if rollback.is_complete() {
                Ok(ExitCode::from(EXIT_ROLLED_BACK))
            } else {
                Ok(ExitCode::from(EXIT_ROLLBACK_FAILED))
            }
        }
    }
}

fn print_invalid_task(error: &RenameError) {
    match error {
        RenameError::RootNotFound(_) => {
            eprintln!("{}", error);
            eprintln!(
                "Incorrect argument list. The path parameter is optional if you launch this utility from the solution root folder."
            );
            eprintln!("{}", Cli::command().render_usage());
        }
        _ => eprintln!("{}", error),
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact()
        )
        .with(filter)
        .init();

    Ok(())
}
