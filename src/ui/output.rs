//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! Machine-readable output (decorated course JSON) is written by the
//! commands themselves; everything here is for humans.

use std::fmt::Display;

use crate::core::course::Course;
use crate::core::types::NodeId;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a status message to stderr (respects quiet mode).
///
/// Used when stdout carries machine-readable output.
pub fn status(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single node as `type  title  route`.
pub fn format_lo(course: &Course, id: NodeId) -> String {
    let lo = course.node(id);
    format!("{:<11} {}  {}", lo.lo_type, lo.display_title(), lo.route)
}

/// Format the subtree under `start` as an indented outline.
///
/// Two spaces per level; hidden nodes are marked.
pub fn format_outline(course: &Course, start: NodeId) -> String {
    let mut lines = Vec::with_capacity(course.len());
    let mut stack = vec![(start, 0usize)];

    while let Some((id, depth)) = stack.pop() {
        let hidden = if course.node(id).hide { " (hidden)" } else { "" };
        lines.push(format!(
            "{}{}{}",
            "  ".repeat(depth),
            format_lo(course, id),
            hidden
        ));
        for child in course.node(id).children.iter().rev() {
            stack.push((*child, depth + 1));
        }
    }

    lines.join("\n")
}
