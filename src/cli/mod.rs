//! cli
//!
//! Command-line interface layer for tutorweave.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load course trees and configuration from disk
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, does the file I/O
//! the engine never does, and hands the course to [`crate::engine`] for the
//! decoration pass.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
