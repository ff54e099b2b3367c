//! Command-line surface: argument parsing, log setup, report rendering and
//! exit status.
//!
//! The `locale-sync` binary is a thin wrapper around these pieces.

pub mod args;
pub mod render;
pub mod run;

pub use args::{init_tracing, Cli};
pub use render::render;
pub use run::{exit_status, run, EXIT_FAILURE, EXIT_SUCCESS};
