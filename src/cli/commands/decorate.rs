//! decorate command - Run a pass and write the decorated course as JSON

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::{decorated, resolve, verbosity, Overrides};
use crate::engine::{Context, CourseView};
use crate::ui::output;

/// Run a decoration pass over `input`.
///
/// JSON goes to `output_path` when given, stdout otherwise. The summary
/// goes to stderr when stdout carries the JSON.
pub fn decorate(
    ctx: &Context,
    input: &Path,
    overrides: &Overrides,
    output_path: Option<&Path>,
) -> Result<()> {
    let (course, report) = decorated(ctx, input, overrides)?;
    let json = serde_json::to_string_pretty(&CourseView::new(&course))
        .context("Failed to serialize decorated course")?;

    let summary = format!(
        "Decorated {} learning objects ({} walls, {} routes, {} collisions)\nfingerprint {}",
        report.nodes,
        report.walls,
        report.index.entries,
        report.index.collisions.len(),
        report.fingerprint
    );

    match output_path {
        Some(path) => {
            let path = resolve(ctx, path)?;
            fs::write(&path, format!("{json}\n"))
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            output::success(summary, verbosity(ctx));
            output::success(format!("Wrote {}", path.display()), verbosity(ctx));
        }
        None => {
            println!("{json}");
            output::status(summary, verbosity(ctx));
        }
    }

    Ok(())
}
