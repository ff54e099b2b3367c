use std::io::Write;

use anyhow::Context;

use super::args::Cli;
use super::render::render;
use crate::driver::{Driver, RunReport};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Run one sync for `cli`, printing the report to `out` and any fatal error
/// to `err`. Returns the process exit status.
pub fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> u8 {
    let result = execute(cli).and_then(|report| {
        writeln!(out, "{}", render(&report)).context("failed to print report")?;
        Ok(report)
    });
    match result {
        Ok(report) => exit_status(&report),
        Err(error) => {
            let _ = writeln!(err, "Error: {error:#}");
            EXIT_FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<RunReport> {
    let config = cli.to_config().context("invalid configuration")?;
    Ok(Driver::new(config).run()?)
}

/// Exit status for a run that got past the reference.
///
/// A dry run fails when any target still lacks reference keys, whether they
/// are pending backfill or blocked by a conflicting value. Otherwise skipped
/// targets and write failures are reported but do not change the status.
pub fn exit_status(report: &RunReport) -> u8 {
    if report.dry_run && (report.pending_count() > 0 || report.conflicted_count() > 0) {
        return EXIT_FAILURE;
    }
    EXIT_SUCCESS
}
