//! Run configuration: where the reference lives and which targets to sync.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TRANSLATIONS_DIR: &str = "assets/translations";
pub const DEFAULT_REFERENCE_NAME: &str = "en.json";
pub const DEFAULT_TARGET_NAMES: &[&str] = &[
    "ru.json", "es.json", "fr.json", "hi.json", "tk.json", "tr.json", "zh.json",
];

const TARGET_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for one synchronization run.
///
/// Every field is optional in a config file; missing ones take the
/// [`Default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// The authority document.
    pub reference_path: PathBuf,
    /// Directory holding the target documents.
    pub targets_dir: PathBuf,
    /// Target file names inside `targets_dir`, processed in this order.
    pub target_names: Vec<String>,
    /// Ignore `target_names` and sync every `*.json` file in `targets_dir`
    /// except the reference.
    pub discover: bool,
    /// Report what is missing without writing anything.
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let dir = PathBuf::from(DEFAULT_TRANSLATIONS_DIR);
        Self {
            reference_path: dir.join(DEFAULT_REFERENCE_NAME),
            targets_dir: dir,
            target_names: DEFAULT_TARGET_NAMES.iter().map(|s| s.to_string()).collect(),
            discover: false,
            dry_run: false,
        }
    }
}

/// A target document to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub name: String,
    pub path: PathBuf,
}

impl SyncConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The targets for this run, in processing order.
    pub fn resolve_targets(&self) -> io::Result<Vec<TargetSpec>> {
        if self.discover {
            return self.discover_targets();
        }
        Ok(self
            .target_names
            .iter()
            .map(|name| TargetSpec {
                name: name.clone(),
                path: self.targets_dir.join(name),
            })
            .collect())
    }

    fn discover_targets(&self) -> io::Result<Vec<TargetSpec>> {
        let reference = fs::canonicalize(&self.reference_path).ok();
        let mut targets = Vec::new();
        for entry in fs::read_dir(&self.targets_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TARGET_EXTENSION)
            {
                continue;
            }
            let is_reference = match (&reference, fs::canonicalize(&path).ok()) {
                (Some(reference), Some(candidate)) => *reference == candidate,
                _ => path == self.reference_path,
            };
            if is_reference {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            targets.push(TargetSpec { name, path });
        }
        targets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(targets)
    }
}
