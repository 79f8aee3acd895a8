//! lookup command - Show a learning object by route

use std::path::Path;

use anyhow::{anyhow, Result};

use super::{decorated, Overrides};
use crate::engine::Context;

/// Print the node at `route` with its parent and breadcrumb chain.
pub fn lookup(ctx: &Context, input: &Path, route: &str) -> Result<()> {
    let (course, _) = decorated(ctx, input, &Overrides::default())?;
    let id = course
        .lookup_id(route)
        .ok_or_else(|| anyhow!("No learning object at route '{}'", route))?;
    let lo = course.node(id);

    println!("id:     {}", lo.id);
    println!("type:   {}", lo.lo_type);
    println!("title:  {}", lo.title);
    println!("route:  {}", lo.route);
    if let Some(parent) = lo.parent {
        println!("parent: {}", course.node(parent).route);
    }
    if let Some(icon) = &lo.icon {
        println!("icon:   {} {}", icon.icon_type, icon.color);
    }
    println!("breadcrumbs:");
    for crumb in course.breadcrumb_routes(id) {
        println!("  {}", crumb);
    }
    if !lo.children.is_empty() {
        println!("children: {}", lo.children.len());
    }

    Ok(())
}
