//! tutorweave - Decorates course trees for static learning sites
//!
//! tutorweave takes a course tree of learning objects (topics, units, labs,
//! talks, notes, ...) and computes everything a site generator needs from
//! it: parent links, breadcrumbs, icons, rendered markdown, panel and unit
//! groupings, per-type walls and a route index.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs the decoration pass over a course
//! - [`render`] - Markdown rendering boundary
//! - [`core`] - Domain types, the course arena, classification, config
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. Every node reachable from the course root is decorated exactly once per pass
//! 2. A node's breadcrumbs start at the course root and end at the node
//! 3. Running a pass twice yields the same decorated course
//! 4. The engine performs no I/O

pub mod cli;
pub mod core;
pub mod engine;
pub mod render;
pub mod ui;
