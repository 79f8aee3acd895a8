//! walls command - List per-type walls

use std::path::Path;

use anyhow::{bail, Result};

use super::{decorated, verbosity, Overrides};
use crate::core::classify::is_wall_type;
use crate::core::types::LoType;
use crate::engine::Context;
use crate::ui::output;

/// List the non-empty walls of the course, or only the wall of `lo_type`.
pub fn walls(ctx: &Context, input: &Path, lo_type: Option<&str>) -> Result<()> {
    let filter = match lo_type {
        Some(tag) => {
            let lo_type = LoType::from(tag);
            if !is_wall_type(&lo_type) {
                bail!(
                    "'{}' has no wall, must be one of: talk, note, lab, web, archive, github",
                    tag
                );
            }
            Some(lo_type)
        }
        None => None,
    };

    let (course, _) = decorated(ctx, input, &Overrides::default())?;

    let mut shown = 0;
    for (wall_type, members) in course.walls.iter() {
        if filter.as_ref().is_some_and(|f| f != wall_type) {
            continue;
        }
        let lines: Vec<String> = members
            .iter()
            .map(|id| output::format_lo(&course, *id))
            .collect();
        println!("{} ({})", wall_type, members.len());
        println!("{}", output::format_list(&lines, "  "));
        shown += 1;
    }

    if shown == 0 {
        output::print("No walls", verbosity(ctx));
    }

    Ok(())
}
