use colored::Colorize;

use crate::prefix_rename::{ItemError, ItemKind};
use crate::{print_error, print_warning};

/// Result of processing a single item.
#[derive(Debug)]
pub enum RenameOutcome {
    /// Item was renamed.
    Renamed {
        kind: ItemKind,
        old_name: String,
        new_name: String,
    },
    /// Dryrun: item would be renamed.
    Previewed {
        kind: ItemKind,
        old_name: String,
        new_name: String,
    },
    /// Dryrun: item would not be renamed.
    Skipped {
        kind: ItemKind,
        old_name: String,
        new_name: String,
        reason: ItemError,
    },
    /// Item could not be renamed.
    Failed {
        kind: ItemKind,
        old_name: String,
        error: ItemError,
    },
}

/// Aggregate counts for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    Execute { succeeded: usize, failed: usize },
    Preview { previewed: usize, conflicting: usize },
}

impl RenameOutcome {
    /// Print the outcome line. Failures and conflicts go to stderr.
    pub fn print(&self) {
        match self {
            Self::Renamed {
                kind,
                old_name,
                new_name,
            } => {
                let (_, new_diff) = crate::color_diff(old_name, new_name);
                println!("{} {kind} {old_name} -> {new_diff}", "✓".green().bold());
            }
            Self::Previewed {
                kind,
                old_name,
                new_name,
            } => {
                let (_, new_diff) = crate::color_diff(old_name, new_name);
                println!("{} {kind} {old_name} -> {new_diff}", "Dryrun:".cyan().bold());
            }
            Self::Skipped {
                kind,
                old_name,
                new_name,
                reason,
            } => {
                print_warning!("Conflict: {kind} {old_name} -> {new_name} ({reason})");
            }
            Self::Failed { kind, old_name, error } => {
                print_error!("{kind} {old_name}: {error}");
            }
        }
    }
}

impl Summary {
    /// Empty summary for the given mode.
    #[must_use]
    pub const fn new(dryrun: bool) -> Self {
        if dryrun {
            Self::Preview {
                previewed: 0,
                conflicting: 0,
            }
        } else {
            Self::Execute {
                succeeded: 0,
                failed: 0,
            }
        }
    }

    /// Count one outcome. Outcomes that do not belong to the summary mode are ignored.
    pub fn record(&mut self, outcome: &RenameOutcome) {
        match (self, outcome) {
            (Self::Execute { succeeded, .. }, RenameOutcome::Renamed { .. }) => *succeeded += 1,
            (Self::Execute { failed, .. }, RenameOutcome::Failed { .. }) => *failed += 1,
            (Self::Preview { previewed, .. }, RenameOutcome::Previewed { .. }) => *previewed += 1,
            (Self::Preview { conflicting, .. }, RenameOutcome::Skipped { .. }) => *conflicting += 1,
            _ => {}
        }
    }

    /// Fold outcomes into a summary.
    #[must_use]
    pub fn from_outcomes<'a>(dryrun: bool, outcomes: impl IntoIterator<Item = &'a RenameOutcome>) -> Self {
        outcomes.into_iter().fold(Self::new(dryrun), |mut summary, outcome| {
            summary.record(outcome);
            summary
        })
    }

    /// Total number of items in the summary.
    #[must_use]
    pub const fn total(&self) -> usize {
        match self {
            Self::Execute { succeeded, failed } => *succeeded + *failed,
            Self::Preview { previewed, conflicting } => *previewed + *conflicting,
        }
    }

    /// Print the final tally.
    pub fn print(&self) {
        match self {
            Self::Execute { succeeded, failed } => {
                println!(
                    "Finished: {} renamed, {} failed",
                    succeeded.to_string().green(),
                    failed.to_string().red()
                );
            }
            Self::Preview { previewed, conflicting } => {
                println!("Dryrun: would rename {}", pluralize_items(*previewed));
                if *conflicting > 0 {
                    print_warning!(
                        "Warning: {} with a conflicting target name",
                        pluralize_items(*conflicting)
                    );
                }
            }
        }
    }
}

fn pluralize_items(count: usize) -> String {
    format!("{count} item{}", if count == 1 { "" } else { "s" })
}
