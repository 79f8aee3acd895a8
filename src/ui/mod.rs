//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so the quiet and debug
//! flags are honored consistently. Internal diagnostics use `tracing`
//! instead.

pub mod output;
