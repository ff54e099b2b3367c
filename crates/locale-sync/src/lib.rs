//! locale-sync: keep translation files in step with a reference locale.
//!
//! Every key-path in the reference document must exist in each target
//! document. Missing (or `null`) entries are backfilled with the reference's
//! value as a placeholder until a translator replaces it.
//!
//! - [`codec`] loads and saves documents as UTF-8 JSON.
//! - [`reconcile`] backfills one target against the reference.
//! - [`driver`] runs a reconciliation pass over every configured target.
//! - [`config`] and [`cli`] describe what to run and report on it.

pub mod cli;
pub mod codec;
pub mod config;
pub mod driver;
pub mod reconcile;

pub use codec::{load, save, LoadError, WriteError};
pub use config::{ConfigError, SyncConfig, TargetSpec};
pub use driver::{Driver, RunReport, SyncError, TargetOutcome, TargetReport};
pub use reconcile::{reconcile, Reconciliation};
