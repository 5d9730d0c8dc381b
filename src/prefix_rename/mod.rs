//! Prefix rename module for prepending a prefix to file and directory names.
//!
//! This module handles a single directory level: the immediate children of the target
//! directory are gathered, optionally filtered by name suffix, and then either previewed
//! (dryrun) or renamed with an optional timestamped backup of each item.

mod backup;
mod config;
mod error;
mod item;
mod outcome;
mod rename;

pub use backup::{BACKUP_TIMESTAMP_FORMAT, backup_path, backup_timestamp, create_backup};
pub use config::PrefixRenameConfig;
pub use error::{ItemError, PrefixRenameError};
pub use item::{Item, ItemKind, gather_items};
pub use outcome::{RenameOutcome, Summary};
pub use rename::PrefixRename;
