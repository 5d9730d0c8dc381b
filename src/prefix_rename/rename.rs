//! Prefix rename implementation.

use std::fs;

use crate::prefix_rename::{
    Item, ItemError, PrefixRenameConfig, PrefixRenameError, RenameOutcome, Summary, backup_timestamp,
    create_backup, gather_items,
};
use crate::{os_str_to_string, print_info};

/// Prefix rename handler for one target directory.
#[derive(Debug)]
pub struct PrefixRename {
    config: PrefixRenameConfig,
}

impl PrefixRename {
    #[must_use]
    pub const fn new(config: PrefixRenameConfig) -> Self {
        Self { config }
    }

    /// Run renaming or dryrun preview for all matching items.
    ///
    /// Per-item failures are reported and counted in the returned summary,
    /// they do not make the run fail.
    ///
    /// # Errors
    /// Returns an error if the target directory cannot be read.
    pub fn run(&self) -> Result<Summary, PrefixRenameError> {
        if self.config.verbose {
            for line in self.config.to_string().lines() {
                print_info!("{line}");
            }
        }

        let items = gather_items(&self.config.directory, self.config.extension.as_deref())?;
        if items.is_empty() {
            println!("No items to process");
            return Ok(Summary::new(self.config.dryrun));
        }

        if self.config.verbose {
            print_info!("Found {} item(s)", items.len());
        }

        let outcomes = if self.config.dryrun {
            self.preview(&items)
        } else {
            self.execute(&items)
        };

        let summary = Summary::from_outcomes(self.config.dryrun, &outcomes);
        summary.print();
        Ok(summary)
    }

    /// Show what would be renamed without touching the filesystem.
    pub fn preview(&self, items: &[Item]) -> Vec<RenameOutcome> {
        items
            .iter()
            .map(|item| {
                let outcome = self.preview_item(item);
                outcome.print();
                outcome
            })
            .collect()
    }

    /// Rename items in order, with an optional backup before each rename.
    ///
    /// Items are processed one at a time,
    /// so collision checks see the renames done earlier in the same run.
    pub fn execute(&self, items: &[Item]) -> Vec<RenameOutcome> {
        let timestamp = self.config.backup.then(backup_timestamp);
        items
            .iter()
            .map(|item| {
                let outcome = self.rename_item(item, timestamp.as_deref());
                outcome.print();
                outcome
            })
            .collect()
    }

    fn preview_item(&self, item: &Item) -> RenameOutcome {
        let new_path = item.new_path(&self.config.prefix);
        let old_name = item.display_name();
        let new_name = os_str_to_string(&item.new_name(&self.config.prefix));

        if fs::symlink_metadata(&new_path).is_ok() {
            RenameOutcome::Skipped {
                kind: item.kind,
                old_name,
                new_name,
                reason: ItemError::NameCollision(new_path),
            }
        } else {
            RenameOutcome::Previewed {
                kind: item.kind,
                old_name,
                new_name,
            }
        }
    }

    fn rename_item(&self, item: &Item, backup_timestamp: Option<&str>) -> RenameOutcome {
        let old_name = item.display_name();
        let new_name = os_str_to_string(&item.new_name(&self.config.prefix));

        match self.try_rename_item(item, backup_timestamp) {
            Ok(()) => RenameOutcome::Renamed {
                kind: item.kind,
                old_name,
                new_name,
            },
            Err(error) => RenameOutcome::Failed {
                kind: item.kind,
                old_name,
                error,
            },
        }
    }

    fn try_rename_item(&self, item: &Item, backup_timestamp: Option<&str>) -> Result<(), ItemError> {
        let new_path = item.new_path(&self.config.prefix);
        if fs::symlink_metadata(&new_path).is_ok() {
            return Err(ItemError::NameCollision(new_path));
        }

        if let Some(timestamp) = backup_timestamp {
            let backup = create_backup(item, timestamp)?;
            if self.config.verbose {
                print_info!("Created backup {}", crate::path_to_filename_string(&backup));
            }
        }

        fs::rename(&item.path, &new_path).map_err(|source| ItemError::MoveFailed {
            target: new_path,
            source,
        })
    }
}

#[cfg(test)]
mod prefix_rename_tests {
    use super::*;

    use std::path::Path;

    use tempfile::{TempDir, tempdir};

    fn create_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).expect("Failed to write file");
    }

    fn create_subdir(dir: &Path, name: &str) {
        fs::create_dir(dir.join(name)).expect("Failed to create subdir");
    }

    fn entry_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn renamer(dir: &TempDir, prefix: &str) -> PrefixRename {
        PrefixRename::new(PrefixRenameConfig::new(Some(prefix.to_string()), Some(dir.path())).unwrap())
    }

    fn renamer_with(
        dir: &TempDir,
        prefix: &str,
        configure: impl FnOnce(PrefixRenameConfig) -> PrefixRenameConfig,
    ) -> PrefixRename {
        let config = PrefixRenameConfig::new(Some(prefix.to_string()), Some(dir.path())).unwrap();
        PrefixRename::new(configure(config))
    }

    #[test]
    fn renames_all_items_without_filter() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "a");
        create_file(dir.path(), "b.md", "b");
        create_subdir(dir.path(), "docs");

        let summary = renamer(&dir, "new_").run().unwrap();
        assert_eq!(
            summary,
            Summary::Execute {
                succeeded: 3,
                failed: 0
            }
        );
        assert_eq!(entry_names(dir.path()), vec!["new_a.txt", "new_b.md", "new_docs"]);
    }

    #[test]
    fn renames_only_matching_files_with_extension_filter() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "a");
        create_file(dir.path(), "b.md", "b");
        create_subdir(dir.path(), "folder.txt");

        let summary = renamer_with(&dir, "new_", |config| config.with_extension(Some(".txt".to_string())))
            .run()
            .unwrap();
        assert_eq!(summary.total(), 1);
        assert_eq!(entry_names(dir.path()), vec!["b.md", "folder.txt", "new_a.txt"]);
    }

    #[test]
    fn dryrun_does_not_modify_filesystem() {
        let dir = tempdir().unwrap();
        create_subdir(dir.path(), "report");
        create_file(dir.path(), "report.txt", "content");

        let summary = renamer_with(&dir, "old_", |config| config.with_dryrun(true)).run().unwrap();
        assert_eq!(
            summary,
            Summary::Preview {
                previewed: 2,
                conflicting: 0
            }
        );
        assert_eq!(entry_names(dir.path()), vec!["report", "report.txt"]);
    }

    #[test]
    fn dryrun_detects_conflicts() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "a");
        create_file(dir.path(), "new_a.txt", "existing");

        let rename = renamer_with(&dir, "new_", |config| config.with_dryrun(true));
        let items = gather_items(dir.path(), None).unwrap();
        let outcomes = rename.preview(&items);

        assert!(matches!(
            &outcomes[0],
            RenameOutcome::Skipped { old_name, new_name, .. } if old_name == "a.txt" && new_name == "new_a.txt"
        ));
        assert!(matches!(&outcomes[1], RenameOutcome::Previewed { new_name, .. } if new_name == "new_new_a.txt"));
        assert_eq!(
            Summary::from_outcomes(true, &outcomes),
            Summary::Preview {
                previewed: 1,
                conflicting: 1
            }
        );
    }

    #[test]
    fn preview_is_repeatable() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "a");
        create_file(dir.path(), "new_a.txt", "existing");
        create_subdir(dir.path(), "docs");

        let rename = renamer_with(&dir, "new_", |config| config.with_dryrun(true));
        let first = rename.run().unwrap();
        let second = rename.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(entry_names(dir.path()), vec!["a.txt", "docs", "new_a.txt"]);
    }

    #[test]
    fn collision_fails_without_overwriting() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "original");
        create_file(dir.path(), "new_a.txt", "existing");

        let rename = renamer(&dir, "new_");
        let items = gather_items(dir.path(), None).unwrap();
        let outcomes = rename.execute(&items);

        assert!(matches!(
            &outcomes[0],
            RenameOutcome::Failed {
                error: ItemError::NameCollision(_),
                ..
            }
        ));
        assert!(matches!(&outcomes[1], RenameOutcome::Renamed { .. }));
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "original");
        assert_eq!(fs::read_to_string(dir.path().join("new_new_a.txt")).unwrap(), "existing");
    }

    #[test]
    fn processing_order_affects_collisions() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a", "first");
        create_file(dir.path(), "pa", "second");

        // "a" is processed first while "pa" still exists
        let rename = renamer(&dir, "p");
        let items = gather_items(dir.path(), None).unwrap();
        let outcomes = rename.execute(&items);

        assert!(matches!(
            &outcomes[0],
            RenameOutcome::Failed {
                error: ItemError::NameCollision(_),
                ..
            }
        ));
        assert!(matches!(&outcomes[1], RenameOutcome::Renamed { new_name, .. } if new_name == "ppa"));
        assert_eq!(entry_names(dir.path()), vec!["a", "ppa"]);
        assert_eq!(fs::read_to_string(dir.path().join("ppa")).unwrap(), "second");
    }

    #[test]
    fn backup_creates_identical_copies() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "file content");
        create_subdir(dir.path(), "docs");
        create_file(&dir.path().join("docs"), "inner.txt", "inner content");

        let summary = renamer_with(&dir, "new_", |config| config.with_backup(true))
            .run()
            .unwrap();
        assert_eq!(
            summary,
            Summary::Execute {
                succeeded: 2,
                failed: 0
            }
        );

        let names = entry_names(dir.path());
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"new_a.txt".to_string()));
        assert!(names.contains(&"new_docs".to_string()));

        let file_backup = names.iter().find(|name| name.starts_with("a.txt.backup.")).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(file_backup)).unwrap(),
            "file content"
        );

        let dir_backup = names.iter().find(|name| name.starts_with("docs.backup.")).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(dir_backup).join("inner.txt")).unwrap(),
            "inner content"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("new_docs").join("inner.txt")).unwrap(),
            "inner content"
        );
    }

    #[test]
    fn failed_backup_skips_rename() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "content");

        let rename = renamer_with(&dir, "new_", |config| config.with_backup(true));
        let items = gather_items(dir.path(), None).unwrap();
        let timestamp = "20240102_030405";
        create_file(dir.path(), "a.txt.backup.20240102_030405", "old backup");

        let outcome = rename.rename_item(&items[0], Some(timestamp));
        assert!(matches!(
            outcome,
            RenameOutcome::Failed {
                error: ItemError::BackupFailed { .. },
                ..
            }
        ));
        assert!(dir.path().join("a.txt").exists());
        assert!(!dir.path().join("new_a.txt").exists());
    }

    #[test]
    fn collision_is_checked_before_backup() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "content");
        create_file(dir.path(), "new_a.txt", "existing");

        let rename = renamer_with(&dir, "new_", |config| config.with_backup(true));
        let items = gather_items(dir.path(), Some("a.txt")).unwrap();
        let outcomes = rename.execute(&items);

        assert!(matches!(
            &outcomes[0],
            RenameOutcome::Failed {
                error: ItemError::NameCollision(_),
                ..
            }
        ));
        assert!(
            !entry_names(dir.path())
                .iter()
                .any(|name| name.starts_with("a.txt.backup."))
        );
    }

    #[test]
    fn move_failure_is_counted_and_processing_continues() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "a.txt", "a");
        create_file(dir.path(), "b.txt", "b");

        // Prefix points into a subdirectory that does not exist
        let rename = renamer(&dir, "nodir/");
        let items = gather_items(dir.path(), None).unwrap();
        let outcomes = rename.execute(&items);

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(matches!(
                outcome,
                RenameOutcome::Failed {
                    error: ItemError::MoveFailed { target, .. },
                    ..
                } if target.parent() == Some(dir.path().join("nodir").as_path())
            ));
        }
        assert_eq!(
            Summary::from_outcomes(false, &outcomes),
            Summary::Execute {
                succeeded: 0,
                failed: 2
            }
        );
        assert_eq!(entry_names(dir.path()), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn empty_directory_has_nothing_to_process() {
        let dir = tempdir().unwrap();
        let summary = renamer(&dir, "new_").run().unwrap();
        assert_eq!(summary.total(), 0);
        assert!(entry_names(dir.path()).is_empty());
    }

    #[test]
    fn no_matching_items_has_nothing_to_process() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "b.md", "b");
        let summary = renamer_with(&dir, "new_", |config| config.with_extension(Some(".txt".to_string())))
            .run()
            .unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(entry_names(dir.path()), vec!["b.md"]);
    }
}
