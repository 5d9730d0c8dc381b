//! Configuration for prefix rename operations.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::prefix_rename::PrefixRenameError;

/// Final config created from CLI arguments.
///
/// Built once by [`PrefixRenameConfig::new`], which validates the prefix and target directory,
/// and never mutated after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRenameConfig {
    pub(crate) prefix: String,
    pub(crate) directory: PathBuf,
    pub(crate) dryrun: bool,
    pub(crate) backup: bool,
    pub(crate) extension: Option<String>,
    pub(crate) verbose: bool,
}

impl PrefixRenameConfig {
    /// Create config from the given prefix and optional target directory.
    ///
    /// An empty or missing directory means the current working directory.
    ///
    /// # Errors
    /// Returns `MissingPrefix` if the prefix is missing or empty,
    /// and `DirectoryNotFound` if the directory does not exist or is not a directory.
    pub fn new(prefix: Option<String>, directory: Option<&Path>) -> Result<Self, PrefixRenameError> {
        let prefix = prefix
            .filter(|prefix| !prefix.is_empty())
            .ok_or(PrefixRenameError::MissingPrefix)?;

        let directory = resolve_directory(directory)?;

        Ok(Self {
            prefix,
            directory,
            dryrun: false,
            backup: false,
            extension: None,
            verbose: false,
        })
    }

    #[must_use]
    pub const fn with_dryrun(mut self, dryrun: bool) -> Self {
        self.dryrun = dryrun;
        self
    }

    #[must_use]
    pub const fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Only include files whose name ends with the given string.
    /// An empty string disables the filter.
    #[must_use]
    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension.filter(|extension| !extension.is_empty());
        self
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    #[must_use]
    pub const fn dryrun(&self) -> bool {
        self.dryrun
    }

    #[must_use]
    pub const fn backup(&self) -> bool {
        self.backup
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Resolve the target directory to an absolute path.
fn resolve_directory(path: Option<&Path>) -> Result<PathBuf, PrefixRenameError> {
    let directory = match path.filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().map_err(PrefixRenameError::CurrentDirectory)?,
    };

    if !directory.is_dir() {
        return Err(PrefixRenameError::DirectoryNotFound(directory));
    }

    dunce::canonicalize(&directory).map_err(|_| PrefixRenameError::DirectoryNotFound(directory))
}

impl fmt::Display for PrefixRenameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "prefix:    \"{}\"", self.prefix)?;
        writeln!(f, "directory: {}", crate::path_to_string(&self.directory))?;
        writeln!(f, "extension: {}", self.extension.as_deref().unwrap_or("none"))?;
        writeln!(f, "dryrun:    {}", crate::colorize_bool(self.dryrun))?;
        writeln!(f, "backup:    {}", crate::colorize_bool(self.backup))
    }
}
