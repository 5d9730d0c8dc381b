use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::prefix_rename::PrefixRenameError;

/// Type of a directory entry to rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Directory,
}

/// A file or directory directly inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub(crate) path: PathBuf,
    pub(crate) name: OsString,
    pub(crate) kind: ItemKind,
}

impl ItemKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Item {
    #[must_use]
    pub const fn new(path: PathBuf, name: OsString, kind: ItemKind) -> Self {
        Self { path, name, kind }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Item name with invalid Unicode handling for printing.
    #[must_use]
    pub fn display_name(&self) -> String {
        crate::os_str_to_string(&self.name)
    }

    /// New name with the prefix prepended.
    #[must_use]
    pub fn new_name(&self, prefix: &str) -> OsString {
        let mut new_name = OsString::from(prefix);
        new_name.push(&self.name);
        new_name
    }

    /// New path in the same parent directory.
    #[must_use]
    pub fn new_path(&self, prefix: &str) -> PathBuf {
        self.path.with_file_name(self.new_name(prefix))
    }
}

/// Gather the immediate children of `directory`, sorted by name.
///
/// With an extension filter, only regular files whose name ends with the filter are included.
/// Without a filter, every entry is included. Symlinks are not followed and count as files,
/// also when they point to a directory.
///
/// # Errors
/// Returns an error if the directory listing cannot be read.
pub fn gather_items(directory: &Path, extension: Option<&str>) -> Result<Vec<Item>, PrefixRenameError> {
    let mut items = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| PrefixRenameError::ReadDirectory {
            path: directory.to_path_buf(),
            source,
        })?;

        let file_type = entry.file_type();
        if let Some(extension) = extension
            && (!file_type.is_file() || !name_ends_with(entry.file_name(), extension))
        {
            continue;
        }

        let kind = if file_type.is_dir() {
            ItemKind::Directory
        } else {
            ItemKind::File
        };

        let name = entry.file_name().to_os_string();
        items.push(Item::new(entry.into_path(), name, kind));
    }

    Ok(items)
}

/// Check name suffix without requiring valid Unicode.
fn name_ends_with(name: &OsStr, suffix: &str) -> bool {
    name.as_encoded_bytes().ends_with(suffix.as_bytes())
}
