use crossterm::style::Stylize;
use solution_rename_core::{RenameError, RenameReport, RollbackReport};

pub fn print_success(report: &RenameReport) {
    if report.dry_run {
        println!("{}", "Dry run complete, nothing was changed.".yellow());
    } else {
        println!("{}", "Solution renamed successfully!".green());
    }

    for (from, to) in &report.renamed {
        let verb = if report.dry_run { "Would rename" } else { "Renamed" };
        println!("--{} {} to {}", verb, from.display(), to.display());
    }
    for path in &report.updated {
        let verb = if report.dry_run { "Would update" } else { "Updated" };
        println!("--{} {}", verb, path.display());
    }
    for path in &report.skipped {
        println!(
            "{}",
            format!("--Skipped {} (not UTF-8 text, edit by hand)", path.display()).yellow()
        );
    }

    println!("  Files processed: {}", report.files_processed);
    println!("  Paths renamed: {}", report.paths_renamed);
    println!("  Content changes: {}", report.content_changes);
}

pub fn print_failure(error: &RenameError, rollback: &RollbackReport) {
    eprintln!("{}", error);
    eprintln!("{}", "Rolling back changes...".yellow());

    if rollback.is_complete() {
        eprintln!(
            "{}",
            format!("Rollback complete ({} change(s) reverted)", rollback.restored).green()
        );
        return;
    }

    eprintln!("{}", "Failed to roll back changes".red());
    for failed in &rollback.unrestored {
        eprintln!("  could not {}: {}", failed.entry, failed.error);
    }
    eprintln!(
        "{} change(s) reverted, {} left in place",
        rollback.restored,
        rollback.unrestored.len()
    );
}

pub fn print_aborted() {
    println!("{}", "Aborting...".yellow());
}
