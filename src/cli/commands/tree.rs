//! tree command - Display the course as an indented outline

use std::path::Path;

use anyhow::Result;

use super::{decorated, Overrides};
use crate::engine::Context;
use crate::ui::output;

/// Print the outline of the course in `input`.
pub fn tree(ctx: &Context, input: &Path) -> Result<()> {
    let (course, _) = decorated(ctx, input, &Overrides::default())?;
    println!("{}", output::format_outline(&course, course.root()));
    Ok(())
}
