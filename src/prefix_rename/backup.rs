//! Timestamped backup copies made before renaming.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use walkdir::WalkDir;

use crate::prefix_rename::{Item, ItemError, ItemKind};

/// Backup timestamp format with seconds resolution.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Current local time formatted for backup names.
#[must_use]
pub fn backup_timestamp() -> String {
    Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string()
}

/// Backup path next to the original: `<path>.backup.<timestamp>`.
#[must_use]
pub fn backup_path(path: &Path, timestamp: &str) -> PathBuf {
    crate::append_extension_to_path(path.to_path_buf(), format!("backup.{timestamp}"))
}

/// Copy the item to its backup path.
///
/// Files are copied directly, directories are copied recursively.
/// An existing backup with the same name is never overwritten.
///
/// # Errors
/// Returns `BackupFailed` if the backup already exists or copying fails.
pub fn create_backup(item: &Item, timestamp: &str) -> Result<PathBuf, ItemError> {
    let backup = backup_path(&item.path, timestamp);

    let result = if fs::symlink_metadata(&backup).is_ok() {
        Err(anyhow::anyhow!("backup already exists: {}", backup.display()))
    } else {
        match item.kind {
            ItemKind::File => copy_file(&item.path, &backup),
            ItemKind::Directory => copy_directory(&item.path, &backup),
        }
    };

    match result {
        Ok(()) => Ok(backup),
        Err(source) => Err(ItemError::BackupFailed { backup, source }),
    }
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if fs::symlink_metadata(source)
        .with_context(|| format!("Failed to read metadata: {}", source.display()))?
        .file_type()
        .is_symlink()
    {
        return copy_symlink(source, target);
    }

    fs::copy(source, target)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))
}

fn copy_directory(source: &Path, target: &Path) -> Result<()> {
    let result = copy_directory_contents(source, target);
    if result.is_err() && target.exists() {
        // Remove partial copy
        let _ = fs::remove_dir_all(target);
    }
    result
}

fn copy_directory_contents(source: &Path, target: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Failed to get relative path")?;
        let destination = target.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&destination)
                .with_context(|| format!("Failed to create directory: {}", destination.display()))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &destination)?;
        } else {
            fs::copy(entry.path(), &destination).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    destination.display()
                )
            })?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(source).with_context(|| format!("Failed to read symlink: {}", source.display()))?;
    std::os::unix::fs::symlink(&link, target)
        .with_context(|| format!("Failed to create symlink: {}", target.display()))
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))
}
