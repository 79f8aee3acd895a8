//! engine::index
//!
//! Flattening and route indexing.
//!
//! # Collisions
//!
//! Two nodes with the same route cannot both be reachable through the
//! index. [`CollisionPolicy`] makes the outcome explicit:
//! - `LastWriteWins`: the node later in document order wins, and every
//!   overwrite is recorded in the [`IndexReport`]
//! - `Reject`: indexing fails with [`IndexError::RouteCollision`]

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::course::Course;
use crate::core::types::{CollisionPolicy, NodeId, Route};

/// Errors from indexing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("route '{route}' is used by both {first} and {second}")]
    RouteCollision {
        route: Route,
        first: NodeId,
        second: NodeId,
    },
}

/// A route that resolved to more than one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCollision {
    pub route: Route,
    /// The node that was indexed first and got replaced.
    pub replaced: NodeId,
    /// The node now in the index.
    pub winner: NodeId,
}

/// Outcome of building the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Number of distinct routes in the index.
    pub entries: usize,
    /// Overwrites under `LastWriteWins`, in the order they happened.
    pub collisions: Vec<RouteCollision>,
}

/// Every node reachable from `root`, each exactly once, in pre-order.
///
/// Lab steps are included.
pub fn flatten(course: &Course, root: NodeId) -> Vec<NodeId> {
    course.preorder(root)
}

/// Rebuild `course.index` from `nodes`.
///
/// # Errors
///
/// Returns `IndexError::RouteCollision` under `CollisionPolicy::Reject` if
/// two nodes share a route. The index is left empty in that case.
pub fn build_index(
    course: &mut Course,
    nodes: &[NodeId],
    policy: CollisionPolicy,
) -> Result<IndexReport, IndexError> {
    course.index.clear();
    let mut report = IndexReport::default();

    for &id in nodes {
        let route = course.node(id).route.clone();
        let Some(previous) = course.index.insert(route.clone(), id) else {
            continue;
        };

        match policy {
            CollisionPolicy::Reject => {
                course.index.clear();
                return Err(IndexError::RouteCollision {
                    route,
                    first: previous,
                    second: id,
                });
            }
            CollisionPolicy::LastWriteWins => {
                warn!(%route, replaced = %previous, winner = %id, "duplicate route, last write wins");
                report.collisions.push(RouteCollision {
                    route,
                    replaced: previous,
                    winner: id,
                });
            }
        }
    }

    report.entries = course.index.len();
    debug!(entries = report.entries, collisions = report.collisions.len(), "built index");
    Ok(report)
}
