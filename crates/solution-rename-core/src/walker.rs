use std::fs::{self, FileType, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::substitution::TokenSubstitution;
use crate::task::RenameOptions;
use crate::undo::{is_occupied, EntryKind, UndoLog};
use crate::{RenameError, RenameReport};

pub(crate) struct WalkContext<'a> {
    pub root: &'a Path,
    pub substitution: &'a TokenSubstitution,
    pub options: &'a RenameOptions,
}

pub(crate) fn rename_tree<F>(
    context: &WalkContext,
    log: &mut UndoLog,
    report: &mut RenameReport,
    on_content: &mut F,
) -> Result<(), RenameError>
where
    F: FnMut(&Path, &str, &str),
{
    rename_directory_recursive(context.root, context, log, report, on_content)
}

fn rename_directory_recursive<F>(
    dir: &Path,
    context: &WalkContext,
    log: &mut UndoLog,
    report: &mut RenameReport,
    on_content: &mut F,
) -> Result<(), RenameError>
where
    F: FnMut(&Path, &str, &str),
{
    debug!("Processing directory: {:?}", dir);

    let entries = list_entries(dir)?;

    // Files first
    for (path, file_type) in entries.iter().filter(|(_, t)| !t.is_dir()) {
        process_file(path, *file_type, context, log, report, on_content)?;
    }

    // Then each directory: rename it, then descend into its new location
    for (path, _) in entries.iter().filter(|(_, t)| t.is_dir()) {
        let relative = path.strip_prefix(context.root).unwrap_or(path.as_path());
        if context.options.excluded.matches(relative) {
            debug!("Skipping excluded directory: {:?}", path);
            continue;
        }

        let renamed = rename_entry(path, EntryKind::Directory, context, log, report)?;
        let next = if context.options.dry_run {
            path.as_path()
        } else {
            renamed.as_path()
        };
        rename_directory_recursive(next, context, log, report, on_content)?;
    }

    Ok(())
}

fn list_entries(dir: &Path) -> Result<Vec<(PathBuf, FileType)>, RenameError> {
    let read_dir_error = |source: io::Error| RenameError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let file_type = entry.file_type().map_err(read_dir_error)?;
        entries.push((entry.path(), file_type));
    }
    entries.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Moves `path` to its renamed location and returns where it now lives.
fn rename_entry(
    path: &Path,
    kind: EntryKind,
    context: &WalkContext,
    log: &mut UndoLog,
    report: &mut RenameReport,
) -> Result<PathBuf, RenameError> {
    let Some(new_path) = context.substitution.rename_segment(path) else {
        return Ok(path.to_path_buf());
    };

    if context.options.dry_run {
        info!("Would rename {}: {:?} -> {:?}", kind, path, new_path);
    } else {
        let move_error = |source: io::Error| RenameError::Move {
            from: path.to_path_buf(),
            to: new_path.clone(),
            source,
        };
        if is_occupied(path, &new_path) {
            return Err(move_error(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination already exists",
            )));
        }
        fs::rename(path, &new_path).map_err(move_error)?;
        info!("Renamed {}: {:?} -> {:?}", kind, path, new_path);
        log.record_move(path, &new_path, kind);
    }

    report.paths_renamed += 1;
    report.renamed.push((path.to_path_buf(), new_path.clone()));
    Ok(new_path)
}

fn process_file<F>(
    path: &Path,
    file_type: FileType,
    context: &WalkContext,
    log: &mut UndoLog,
    report: &mut RenameReport,
    on_content: &mut F,
) -> Result<(), RenameError>
where
    F: FnMut(&Path, &str, &str),
{
    debug!("Processing file: {:?}", path);
    report.files_processed += 1;

    let current = rename_entry(path, EntryKind::File, context, log, report)?;

    if !file_type.is_file() {
        debug!("Skipping contents of special file: {:?}", path);
        return Ok(());
    }
    if context.options.binary_extensions.matches(path) {
        debug!("Skipping binary file: {:?}", path);
        return Ok(());
    }

    let source = if context.options.dry_run { path } else { current.as_path() };
    let bytes = fs::read(source).map_err(|source_error| RenameError::Read {
        path: source.to_path_buf(),
        source: source_error,
    })?;
    let Ok(content) = std::str::from_utf8(&bytes) else {
        if contains_encoded(&bytes, context.substitution.token()) {
            warn!(
                "Skipping non UTF-8 file containing '{}': {:?}",
                context.substitution.token(),
                current
            );
            report.skipped.push(current);
        } else {
            debug!("Skipping non UTF-8 file: {:?}", path);
        }
        return Ok(());
    };
    let Some(new_content) = context.substitution.process_content(content) else {
        return Ok(());
    };

    on_content(&current, content, &new_content);

    if context.options.dry_run {
        info!("Would update contents of: {:?}", current);
    } else {
        let write_error = |source: io::Error| RenameError::Write {
            path: current.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&current)
            .map_err(write_error)?;
        // Truncated from here on, so a failed write must still be restored.
        log.record_rewrite(&current, bytes);
        file.write_all(new_content.as_bytes()).map_err(write_error)?;
        info!("Updated contents of: {:?}", current);
    }

    report.content_changes += 1;
    report.updated.push(current);
    Ok(())
}

/// Whether `bytes` hold `token` as UTF-8 or as UTF-16 in either byte order.
fn contains_encoded(bytes: &[u8], token: &str) -> bool {
    let utf8 = token.as_bytes().to_vec();
    let utf16_le: Vec<u8> = token.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let utf16_be: Vec<u8> = token.encode_utf16().flat_map(u16::to_be_bytes).collect();

    [utf8, utf16_le, utf16_be]
        .iter()
        .any(|needle| bytes.windows(needle.len()).any(|window| window == needle.as_slice()))
}
