//! `locale-sync`: backfill missing translation keys from a reference file.
//!
//! Usage:
//!   locale-sync [--config FILE] [--reference FILE] [--targets-dir DIR]
//!               [--target NAME]... [--discover] [--check] [-v]...
//!
//! With no arguments, `assets/translations/en.json` is the reference and the
//! standard set of locale files next to it are the targets.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use locale_sync::cli::{init_tracing, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let status = run(&cli, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(status)
}
