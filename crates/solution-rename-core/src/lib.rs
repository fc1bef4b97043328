use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod substitution;
pub mod task;
pub mod undo;
mod walker;

pub use substitution::TokenSubstitution;
pub use task::{BinaryExtensions, ExcludedDirectories, RenameOptions, RenameTask, UNSAFE_TOKEN_LEN};
pub use undo::{EntryKind, FailedRestore, RollbackReport, UndoEntry, UndoLog};

#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    #[error("Path does not exist or is not a directory: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error(
        "Please specify longer solution names. '{token}' is unsafe to rename as it may accidentally lead to undesired renames."
    )]
    UnsafeToken { token: String },
    #[error("Solution names must not contain path separators: '{token}'")]
    SeparatorInToken { token: String },
    #[error("Failed to list directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Everything a run changed (or, for a dry run, would change).
#[derive(Debug, Default)]
pub struct RenameReport {
    pub files_processed: usize,
    pub paths_renamed: usize,
    pub content_changes: usize,
    /// `(from, to)` for every file and directory move, in walk order.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Files whose contents were rewritten, at their final path.
    pub updated: Vec<PathBuf>,
    /// Files holding the token in an encoding other than UTF-8. Left unchanged.
    pub skipped: Vec<PathBuf>,
    pub dry_run: bool,
}

impl RenameReport {
    fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn is_noop(&self) -> bool {
        self.renamed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug)]
pub enum RenameOutcome {
    Completed(RenameReport),
    /// The walk failed; every journaled change was replayed in reverse.
    RolledBack {
        error: RenameError,
        rollback: RollbackReport,
    },
}

pub fn run(task: &RenameTask, options: &RenameOptions) -> RenameOutcome {
    run_with(task, options, |_, _, _| {})
}

/// Runs the rename, calling `on_content(path, old, new)` for each file whose
/// contents change, before anything is written.
pub fn run_with<F>(task: &RenameTask, options: &RenameOptions, mut on_content: F) -> RenameOutcome
where
    F: FnMut(&Path, &str, &str),
{
    let substitution = TokenSubstitution::new(task.old_token(), task.new_token());
    let context = walker::WalkContext {
        root: task.root(),
        substitution: &substitution,
        options,
    };

    info!(
        "Renaming '{}' -> '{}' in {:?}",
        task.old_token(),
        task.new_token(),
        task.root()
    );

    let mut log = UndoLog::new();
    let mut report = RenameReport::new(options.dry_run);

    match walker::rename_tree(&context, &mut log, &mut report, &mut on_content) {
        Ok(()) => {
            info!(
                "Rename complete: {} files processed, {} paths renamed, {} content changes",
                report.files_processed, report.paths_renamed, report.content_changes
            );
            RenameOutcome::Completed(report)
        }
        Err(error) => {
            warn!("Rename failed, rolling back {} change(s): {}", log.len(), error);
            let rollback = log.rollback();
            RenameOutcome::RolledBack { error, rollback }
        }
    }
}
