//! engine::walls
//!
//! Course walls: flat, per-type galleries of learning objects.

use tracing::debug;

use crate::core::course::Course;
use crate::core::types::LoType;

/// Rebuild `course.walls` for the given types.
///
/// Walls are kept in the order of `types`, and each wall lists matching
/// nodes in document order. Types with no matching node get no entry;
/// repeated types are built once.
pub fn build_walls(course: &mut Course, types: &[LoType]) {
    course.walls.clear();
    let order = course.preorder(course.root());

    for lo_type in types {
        let los: Vec<_> = order
            .iter()
            .copied()
            .filter(|id| course.node(*id).lo_type == *lo_type)
            .collect();
        let count = los.len();
        if course.walls.push(lo_type.clone(), los) {
            debug!(wall = %lo_type, count, "built wall");
        }
    }
}
