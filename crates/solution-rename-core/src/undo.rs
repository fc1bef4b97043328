use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// A single completed mutation, with what is needed to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    Moved {
        from: PathBuf,
        to: PathBuf,
        kind: EntryKind,
    },
    /// `original` holds the file's bytes as they were before the write.
    Rewritten { path: PathBuf, original: Vec<u8> },
}

impl UndoEntry {
    fn revert(&self) -> io::Result<()> {
        match self {
            UndoEntry::Moved { from, to, .. } => {
                if is_occupied(to, from) {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} is already occupied", from.display()),
                    ));
                }
                fs::rename(to, from)
            }
            UndoEntry::Rewritten { path, original } => fs::write(path, original),
        }
    }
}

impl fmt::Display for UndoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoEntry::Moved { from, to, kind } => {
                write!(f, "move {} {} back to {}", kind, to.display(), from.display())
            }
            UndoEntry::Rewritten { path, .. } => {
                write!(f, "restore contents of {}", path.display())
            }
        }
    }
}

/// Whether moving `source` to `destination` would replace some other entry.
/// A destination that resolves to `source` itself, as a case-only rename does
/// on a case-insensitive filesystem, is not occupied.
pub(crate) fn is_occupied(source: &Path, destination: &Path) -> bool {
    if fs::symlink_metadata(destination).is_err() {
        return false;
    }
    !same_file::is_same_file(source, destination).unwrap_or(false)
}

/// Ordered journal of the mutations made by one run.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_move(&mut self, from: &Path, to: &Path, kind: EntryKind) {
        self.entries.push(UndoEntry::Moved {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            kind,
        });
    }

    pub fn record_rewrite(&mut self, path: &Path, original: Vec<u8>) {
        self.entries.push(UndoEntry::Rewritten {
            path: path.to_path_buf(),
            original,
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Replays the journal newest first. A failed entry is kept in the report
    /// and the replay carries on with the rest.
    pub fn rollback(self) -> RollbackReport {
        info!("Rolling back {} change(s)", self.entries.len());

        let mut report = RollbackReport::default();
        for entry in self.entries.into_iter().rev() {
            match entry.revert() {
                Ok(()) => {
                    debug!("Reverted: {}", entry);
                    report.restored += 1;
                }
                Err(error) => {
                    warn!("Could not {}: {}", entry, error);
                    report.unrestored.push(FailedRestore { entry, error });
                }
            }
        }
        report
    }
}

#[derive(Debug)]
pub struct FailedRestore {
    pub entry: UndoEntry,
    pub error: io::Error,
}

#[derive(Debug, Default)]
pub struct RollbackReport {
    pub restored: usize,
    pub unrestored: Vec<FailedRestore>,
}

impl RollbackReport {
    pub fn is_complete(&self) -> bool {
        self.unrestored.is_empty()
    }
}
