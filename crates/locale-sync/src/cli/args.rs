use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::Level;

use crate::config::{ConfigError, SyncConfig};

#[derive(Debug, Parser)]
#[command(
    name = "locale-sync",
    version,
    about = "Backfill missing translation keys from a reference locale file"
)]
pub struct Cli {
    /// TOML file with `reference_path`, `targets_dir`, `target_names`, `discover`, `dry_run`
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Reference (authority) document
    #[arg(long)]
    pub reference: Option<PathBuf>,
    /// Directory containing the target documents
    #[arg(long)]
    pub targets_dir: Option<PathBuf>,
    /// Target file name inside the targets directory; repeat for several
    #[arg(long = "target", value_name = "NAME")]
    pub targets: Vec<String>,
    /// Sync every *.json file in the targets directory except the reference
    #[arg(long, conflicts_with = "targets")]
    pub discover: bool,
    /// Report missing keys without writing; exit with status 1 if any are found
    #[arg(long)]
    pub check: bool,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config file values (or defaults), overridden by command-line flags.
    pub fn to_config(&self) -> Result<SyncConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SyncConfig::from_toml_file(path)?,
            None => SyncConfig::default(),
        };
        if let Some(reference) = &self.reference {
            config.reference_path = reference.clone();
        }
        if let Some(dir) = &self.targets_dir {
            config.targets_dir = dir.clone();
        }
        if !self.targets.is_empty() {
            config.target_names = self.targets.clone();
            config.discover = false;
        }
        if self.discover {
            config.discover = true;
        }
        if self.check {
            config.dry_run = true;
        }
        Ok(config)
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Install the stderr log subscriber. Later calls are no-ops.
pub fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let cli = Cli::try_parse_from(["locale-sync"]).unwrap();
        assert_eq!(cli.to_config().unwrap(), SyncConfig::default());
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "locale-sync",
            "--reference",
            "l10n/en.json",
            "--targets-dir",
            "l10n",
            "--target",
            "de.json",
            "--target",
            "pl.json",
            "--check",
            "-vv",
        ])
        .unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.reference_path, PathBuf::from("l10n/en.json"));
        assert_eq!(config.targets_dir, PathBuf::from("l10n"));
        assert_eq!(config.target_names, vec!["de.json", "pl.json"]);
        assert!(config.dry_run);
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_discover_conflicts_with_targets() {
        assert!(Cli::try_parse_from(["locale-sync", "--discover", "--target", "a.json"]).is_err());
        let cli = Cli::try_parse_from(["locale-sync", "--discover"]).unwrap();
        assert!(cli.to_config().unwrap().discover);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("locale-sync.toml");
        std::fs::write(
            &file,
            "targets_dir = \"from-file\"\ntarget_names = [\"ja.json\"]\ndiscover = true\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "locale-sync".into(),
            "--config".into(),
            file.clone().into_os_string(),
            "--target".into(),
            "ko.json".into(),
        ])
        .unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.targets_dir, PathBuf::from("from-file"));
        assert_eq!(config.target_names, vec!["ko.json"]);
        assert!(!config.discover);
    }
}
