//! One synchronization run over every configured target.

use std::io;
use std::path::{Path, PathBuf};

use locale_sync_tree::{enumerate_keys, Document, KeyPath};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::codec::{self, LoadError, WriteError};
use crate::config::{SyncConfig, TargetSpec};
use crate::reconcile::{reconcile, Reconciliation};

/// Failures that stop a run before any target is touched.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("could not load reference document")]
    ReferenceLoad(#[source] LoadError),
    #[error("reference document {} has no keys", path.display())]
    EmptyReference { path: PathBuf },
    #[error("could not list targets in {}", dir.display())]
    Discover {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What happened to one target.
#[derive(Debug)]
pub enum TargetOutcome {
    /// The target could not be loaded and was left alone.
    Skipped(LoadError),
    /// Nothing was missing.
    Complete(Reconciliation),
    /// Nothing could be backfilled, but some reference keys are blocked by
    /// non-object values in the target.
    Conflicted(Reconciliation),
    /// Missing keys were backfilled and the file rewritten.
    Updated(Reconciliation),
    /// Missing keys were found during a dry run; nothing was written.
    Pending(Reconciliation),
    /// Missing keys were backfilled in memory but the file could not be written.
    WriteFailed {
        reconciliation: Reconciliation,
        error: WriteError,
    },
}

impl TargetOutcome {
    pub fn reconciliation(&self) -> Option<&Reconciliation> {
        match self {
            TargetOutcome::Skipped(_) => None,
            TargetOutcome::Complete(rec)
            | TargetOutcome::Conflicted(rec)
            | TargetOutcome::Updated(rec)
            | TargetOutcome::Pending(rec) => Some(rec),
            TargetOutcome::WriteFailed { reconciliation, .. } => Some(reconciliation),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TargetOutcome::Skipped(_) | TargetOutcome::WriteFailed { .. })
    }
}

#[derive(Debug)]
pub struct TargetReport {
    pub name: String,
    pub path: PathBuf,
    pub outcome: TargetOutcome,
}

#[derive(Debug)]
pub struct RunReport {
    pub reference_path: PathBuf,
    /// Number of key-paths in the reference document.
    pub reference_keys: usize,
    pub dry_run: bool,
    pub targets: Vec<TargetReport>,
}

impl RunReport {
    pub fn updated_count(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Updated(_)))
    }

    pub fn pending_count(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Pending(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.count(TargetOutcome::is_failure)
    }

    /// Targets left with reference keys that could not be backfilled.
    pub fn conflicted_count(&self) -> usize {
        self.count(|o| o.reconciliation().is_some_and(Reconciliation::has_conflicts))
    }

    /// `true` when every target was loaded and already had every key.
    pub fn is_complete(&self) -> bool {
        self.targets
            .iter()
            .all(|t| matches!(t.outcome, TargetOutcome::Complete(_)))
    }

    fn count(&self, pred: impl Fn(&TargetOutcome) -> bool) -> usize {
        self.targets.iter().filter(|t| pred(&t.outcome)).count()
    }
}

pub struct Driver {
    config: SyncConfig,
}

impl Driver {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Load the reference once, then reconcile each target in order.
    ///
    /// Only reference and discovery failures abort the run; a target that
    /// cannot be loaded or written is reported and the run moves on.
    pub fn run(&self) -> Result<RunReport, SyncError> {
        let reference_path = &self.config.reference_path;
        let reference = codec::load(reference_path).map_err(|err| {
            debug!(path = %reference_path.display(), error = %err, "reference load failed");
            SyncError::ReferenceLoad(err)
        })?;

        let reference_keys = enumerate_keys(reference.root());
        if reference_keys.is_empty() {
            debug!(path = %reference_path.display(), "reference has no keys");
            return Err(SyncError::EmptyReference {
                path: reference_path.clone(),
            });
        }
        info!(path = %reference_path.display(), keys = reference_keys.len(), "loaded reference");

        let targets = self
            .config
            .resolve_targets()
            .map_err(|source| SyncError::Discover {
                dir: self.config.targets_dir.clone(),
                source,
            })?;

        let targets = targets
            .into_iter()
            .map(|target| self.sync_target(target, &reference_keys, &reference))
            .collect();

        Ok(RunReport {
            reference_path: reference_path.clone(),
            reference_keys: reference_keys.len(),
            dry_run: self.config.dry_run,
            targets,
        })
    }

    fn sync_target(&self, target: TargetSpec, reference_keys: &[KeyPath], reference: &Document) -> TargetReport {
        let TargetSpec { name, path } = target;

        let mut doc = match codec::load(&path) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(file = %name, error = %err, "skipping target");
                return TargetReport {
                    name,
                    path,
                    outcome: TargetOutcome::Skipped(err),
                };
            }
        };

        let reconciliation = reconcile(reference_keys, reference, &mut doc);

        let outcome = if reconciliation.modified() {
            self.write_back(&name, &path, &doc, reconciliation)
        } else if reconciliation.has_conflicts() {
            warn!(file = %name, conflicts = reconciliation.conflicts.len(), "keys blocked by non-object values");
            TargetOutcome::Conflicted(reconciliation)
        } else {
            info!(file = %name, "complete");
            TargetOutcome::Complete(reconciliation)
        };

        TargetReport { name, path, outcome }
    }

    fn write_back(&self, name: &str, path: &Path, doc: &Document, reconciliation: Reconciliation) -> TargetOutcome {
        let missing = reconciliation.missing_count();
        if self.config.dry_run {
            info!(file = %name, missing, "missing keys (dry run)");
            return TargetOutcome::Pending(reconciliation);
        }
        match codec::save(path, doc) {
            Ok(()) => {
                info!(file = %name, missing, "updated");
                TargetOutcome::Updated(reconciliation)
            }
            Err(error) => {
                warn!(file = %name, error = %error, "write failed");
                TargetOutcome::WriteFailed {
                    reconciliation,
                    error,
                }
            }
        }
    }
}
