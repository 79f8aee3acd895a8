//! engine::decorate
//!
//! The tree decorator.
//!
//! # Algorithm
//!
//! A pre-order walk from the course root over an explicit work stack. For
//! each node:
//!
//! 1. Render `content_md` and `summary_md` (panel notes pass their id as
//!    asset prefix)
//! 2. Take `icon` from front matter
//! 3. Set `root_course`
//! 4. Set `breadcrumbs` to the parent's chain plus self
//! 5. Composite nodes: compute `panels` and `units`
//! 6. Assign `parent` on every child and schedule it
//!
//! Labs are special: everything below a lab is step content and gets
//! ancestry and rendered content only, with no icon or groupings.
//!
//! # Invariants
//!
//! - A parent is always decorated before its children, so its breadcrumb
//!   chain is complete when a child copies it
//! - Every computed field is cleared before the walk; the pass never reads
//!   a value left over from a previous pass

use thiserror::Error;
use tracing::trace;

use crate::core::classify::{classify, is_composite, sort_los, Category};
use crate::core::course::Course;
use crate::core::lo::{Panels, Units};
use crate::core::types::{LoType, NodeId, Route};
use crate::render::{MarkdownRenderer, RenderError};

/// Errors from decoration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecorateError {
    #[error("failed to render '{route}': {source}")]
    Render {
        route: Route,
        #[source]
        source: RenderError,
    },
}

/// Decorate every node of the course in place.
///
/// # Errors
///
/// Returns `DecorateError::Render` on the first renderer failure. The pass
/// stops there and the course is left partially decorated.
pub fn decorate(course: &mut Course, renderer: &dyn MarkdownRenderer) -> Result<(), DecorateError> {
    course.reset_decorations();

    let root = course.root();
    // (node, inside a lab)
    let mut stack = vec![(root, false)];

    while let Some((id, in_lab)) = stack.pop() {
        if in_lab {
            decorate_step(course, id, root, renderer)?;
        } else {
            decorate_lo(course, id, root, renderer)?;
        }

        let children = course.node(id).children.clone();
        for &child in &children {
            course.node_mut(child).parent = Some(id);
        }

        let steps = in_lab || course.node(id).lo_type == LoType::Lab;
        stack.extend(children.iter().rev().map(|&child| (child, steps)));
    }

    Ok(())
}

fn decorate_lo(
    course: &mut Course,
    id: NodeId,
    root: NodeId,
    renderer: &dyn MarkdownRenderer,
) -> Result<(), DecorateError> {
    let lo = course.node(id);
    trace!(route = %lo.route, lo_type = %lo.lo_type, "decorating");

    let asset_prefix = (lo.lo_type == LoType::PanelNote).then(|| lo.id.clone());
    let content_html = render(renderer, &lo.content_md, asset_prefix.as_deref(), &lo.route)?;
    let summary_html = render(renderer, &lo.summary_md, None, &lo.route)?;
    let icon = lo.front_matter.icon();
    let breadcrumbs = crumbs(course, id);
    let groupings = is_composite(&lo.lo_type).then(|| group_children(course, &lo.children));

    let lo = course.node_mut(id);
    lo.content_html = content_html;
    lo.summary_html = summary_html;
    lo.icon = icon;
    lo.root_course = Some(root);
    lo.breadcrumbs = breadcrumbs;
    if let Some((panels, units)) = groupings {
        lo.panels = Some(panels);
        lo.units = Some(units);
    }
    Ok(())
}

fn decorate_step(
    course: &mut Course,
    id: NodeId,
    root: NodeId,
    renderer: &dyn MarkdownRenderer,
) -> Result<(), DecorateError> {
    let step = course.node(id);
    let content_html = render(renderer, &step.content_md, None, &step.route)?;
    let breadcrumbs = crumbs(course, id);

    let step = course.node_mut(id);
    step.content_html = content_html;
    step.root_course = Some(root);
    step.breadcrumbs = breadcrumbs;
    Ok(())
}

fn render(
    renderer: &dyn MarkdownRenderer,
    markdown: &str,
    asset_prefix: Option<&str>,
    route: &Route,
) -> Result<String, DecorateError> {
    renderer
        .render(markdown, asset_prefix)
        .map_err(|source| DecorateError::Render {
            route: route.clone(),
            source,
        })
}

/// The breadcrumb chain of `id`: its parent's chain followed by itself.
///
/// Relies on the parent having been decorated already.
fn crumbs(course: &Course, id: NodeId) -> Vec<NodeId> {
    let mut chain = match course.node(id).parent {
        Some(parent) => course.node(parent).breadcrumbs.clone(),
        None => Vec::new(),
    };
    chain.push(id);
    chain
}

/// Partition the children of a composite node.
///
/// Every child lands in exactly one bucket.
pub(crate) fn group_children(course: &Course, children: &[NodeId]) -> (Panels, Units) {
    let mut panels = Panels::default();
    let mut units = Units::default();
    let mut standard = Vec::new();

    for &child in children {
        match classify(&course.node(child).lo_type) {
            Category::PanelVideo => panels.panel_videos.push(child),
            Category::PanelTalk => panels.panel_talks.push(child),
            Category::PanelNote => panels.panel_notes.push(child),
            Category::Unit => units.units.push(child),
            Category::Side => units.sides.push(child),
            Category::Standard => standard.push(child),
        }
    }

    units.standard_los = sort_los(standard, |id| course.node(*id).front_matter.order());
    (panels, units)
}
