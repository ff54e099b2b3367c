use std::error::Error;
use std::path::Path;

use crate::driver::{RunReport, TargetOutcome, TargetReport};
use crate::reconcile::Reconciliation;

/// Human-readable progress text for a finished run.
pub fn render(report: &RunReport) -> String {
    let mut lines = vec![format!(
        "Found {} keys in {}",
        report.reference_keys,
        display_name(&report.reference_path)
    )];
    for target in &report.targets {
        render_target(target, &mut lines);
    }
    lines.join("\n")
}

fn render_target(target: &TargetReport, lines: &mut Vec<String>) {
    let name = &target.name;

    if let TargetOutcome::Skipped(err) = &target.outcome {
        if err.is_not_found() {
            lines.push(format!("Warning: {name} does not exist, skipping..."));
        } else {
            lines.push(format!(
                "Warning: could not load {name}: {}, skipping...",
                error_chain(err)
            ));
        }
        return;
    }

    lines.push(String::new());
    lines.push(format!("Checking {name}..."));

    match &target.outcome {
        TargetOutcome::Skipped(_) => {}
        TargetOutcome::Complete(_) => {
            lines.push(format!("  ✓ {name} is complete!"));
        }
        TargetOutcome::Conflicted(rec) => {
            push_conflicts(rec, lines);
            lines.push(format!(
                "  ✗ {name} is incomplete: {} keys need a manual fix",
                rec.conflicts.len()
            ));
        }
        TargetOutcome::Updated(rec) => {
            push_backfilled(rec, "Added missing key", " (using reference value as placeholder)", lines);
            push_conflicts(rec, lines);
            lines.push(format!(
                "  Updated {name} with {} missing keys",
                rec.missing_count()
            ));
        }
        TargetOutcome::Pending(rec) => {
            push_backfilled(rec, "Missing key", "", lines);
            push_conflicts(rec, lines);
            lines.push(format!(
                "  {name} is missing {} keys (dry run, not written)",
                rec.missing_count()
            ));
        }
        TargetOutcome::WriteFailed {
            reconciliation,
            error,
        } => {
            push_backfilled(
                reconciliation,
                "Added missing key",
                " (using reference value as placeholder)",
                lines,
            );
            push_conflicts(reconciliation, lines);
            lines.push(format!("  Failed to write {name}: {}", error_chain(error)));
        }
    }
}

fn push_backfilled(rec: &Reconciliation, label: &str, note: &str, lines: &mut Vec<String>) {
    for key in &rec.backfilled {
        lines.push(format!("  {label}: {key}{note}"));
    }
}

fn push_conflicts(rec: &Reconciliation, lines: &mut Vec<String>) {
    for key in &rec.conflicts {
        lines.push(format!(
            "  Conflicting key: {key} (target holds a non-object value on the way)"
        ));
    }
}

fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// `error: cause: cause ...`, like `anyhow`'s alternate formatting.
fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{LoadError, WriteError};
    use locale_sync_tree::KeyPath;
    use std::io;
    use std::path::PathBuf;

    fn rec(backfilled: &[&str], conflicts: &[&str]) -> Reconciliation {
        Reconciliation {
            backfilled: backfilled.iter().map(|k| KeyPath::parse(k)).collect(),
            conflicts: conflicts.iter().map(|k| KeyPath::parse(k)).collect(),
        }
    }

    fn target(name: &str, outcome: TargetOutcome) -> TargetReport {
        TargetReport {
            name: name.to_string(),
            path: PathBuf::from("assets/translations").join(name),
            outcome,
        }
    }

    fn report(targets: Vec<TargetReport>) -> RunReport {
        RunReport {
            reference_path: PathBuf::from("assets/translations/en.json"),
            reference_keys: 12,
            dry_run: false,
            targets,
        }
    }

    #[test]
    fn test_render_updated_and_complete() {
        let text = render(&report(vec![
            target("fr.json", TargetOutcome::Updated(rec(&["a.c", "d"], &[]))),
            target("es.json", TargetOutcome::Complete(rec(&[], &[]))),
        ]));
        let expected = "Found 12 keys in en.json\n\
            \n\
            Checking fr.json...\n  \
            Added missing key: a.c (using reference value as placeholder)\n  \
            Added missing key: d (using reference value as placeholder)\n  \
            Updated fr.json with 2 missing keys\n\
            \n\
            Checking es.json...\n  \
            ✓ es.json is complete!";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_missing_target() {
        let err = LoadError::Io {
            path: PathBuf::from("assets/translations/tk.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let text = render(&report(vec![target("tk.json", TargetOutcome::Skipped(err))]));
        assert_eq!(
            text,
            "Found 12 keys in en.json\nWarning: tk.json does not exist, skipping..."
        );
    }

    #[test]
    fn test_render_unreadable_target_includes_cause() {
        let err = LoadError::Io {
            path: PathBuf::from("assets/translations/tr.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = render(&report(vec![target("tr.json", TargetOutcome::Skipped(err))]));
        assert!(text.ends_with(
            "Warning: could not load tr.json: failed to read assets/translations/tr.json: denied, skipping..."
        ));
    }

    #[test]
    fn test_render_pending_and_conflicts() {
        let text = render(&report(vec![target(
            "hi.json",
            TargetOutcome::Pending(rec(&["x"], &["menu.open"])),
        )]));
        assert!(text.contains("  Missing key: x\n"));
        assert!(text.contains("  Conflicting key: menu.open (target holds a non-object value on the way)"));
        assert!(text.ends_with("  hi.json is missing 1 keys (dry run, not written)"));
    }

    #[test]
    fn test_render_conflicts_only_is_not_complete() {
        let text = render(&report(vec![target(
            "fr.json",
            TargetOutcome::Conflicted(rec(&[], &["menu.open"])),
        )]));
        let expected = "Found 12 keys in en.json\n\
            \n\
            Checking fr.json...\n  \
            Conflicting key: menu.open (target holds a non-object value on the way)\n  \
            ✗ fr.json is incomplete: 1 keys need a manual fix";
        assert_eq!(text, expected);
        assert!(!text.contains("is complete!"));
    }

    #[test]
    fn test_render_write_failure() {
        let error = WriteError::Io {
            path: PathBuf::from("assets/translations/zh.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        };
        let text = render(&report(vec![target(
            "zh.json",
            TargetOutcome::WriteFailed {
                reconciliation: rec(&["a"], &[]),
                error,
            },
        )]));
        assert!(text.ends_with(
            "  Failed to write zh.json: failed to write assets/translations/zh.json: read-only"
        ));
    }
}
