//! core::course
//!
//! The course arena: owner of every learning object in a course tree.
//!
//! # Architecture
//!
//! Nodes live in a single `Vec<Lo>` and refer to each other through
//! [`NodeId`]s:
//! - Child edges are stored on the parent (`Lo::children`), in document order
//! - Parent, root and breadcrumb links are ids written by the decorator
//!
//! The arena owns everything; back references are plain indices, so there
//! is nothing to tear down and no reference cycles.
//!
//! # Invariants
//!
//! - The root is always `NodeId(0)` and has type `course`
//! - Nodes are allocated in pre-order, so arena order is document order
//! - Every non-root node is the child of exactly one node

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::lo::{Lo, RawLo};
use super::types::{Fingerprint, LoType, NodeId, Properties, Route};

/// Errors from building a course arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("root learning object must be a course, found '{0}'")]
    NotACourse(String),
}

/// A link shown in the course companion bar or wall bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanionItem {
    pub link: String,
    pub icon: String,
    pub target: String,
    pub tip: String,
}

/// External resources linked from the course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Companions {
    pub show: bool,
    pub bar: Vec<CompanionItem>,
}

/// Course-wide switches derived from course properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFlags {
    pub is_portfolio: bool,
    pub are_videos_hidden: bool,
    pub are_lab_steps_auto_numbered: bool,
}

impl Default for CourseFlags {
    fn default() -> Self {
        Self {
            is_portfolio: false,
            are_videos_hidden: true,
            are_lab_steps_auto_numbered: true,
        }
    }
}

impl CourseFlags {
    /// Derive flags from course properties.
    ///
    /// `portfolio` is opt-in; `hideVideos` and `labStepsAutoNumber` are
    /// opt-out and only a literal `"false"` disables them.
    pub fn from_properties(properties: &Properties) -> Self {
        let is = |key: &str, value: &str| properties.get_string(key).as_deref() == Some(value);
        Self {
            is_portfolio: is("portfolio", "true"),
            are_videos_hidden: !is("hideVideos", "false"),
            are_lab_steps_auto_numbered: !is("labStepsAutoNumber", "false"),
        }
    }
}

/// Per-type walls, kept in the order they were built.
///
/// Only non-empty walls are stored and each type appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walls(Vec<(LoType, Vec<NodeId>)>);

impl Walls {
    /// Members of the wall for `lo_type`, if it was built.
    pub fn get(&self, lo_type: &LoType) -> Option<&[NodeId]> {
        self.0
            .iter()
            .find(|(wall_type, _)| wall_type == lo_type)
            .map(|(_, los)| los.as_slice())
    }

    pub fn contains(&self, lo_type: &LoType) -> bool {
        self.get(lo_type).is_some()
    }

    /// Wall types in build order.
    pub fn types(&self) -> impl Iterator<Item = &LoType> {
        self.0.iter().map(|(lo_type, _)| lo_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LoType, &[NodeId])> {
        self.0.iter().map(|(lo_type, los)| (lo_type, los.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a wall. Empty walls and types already present are ignored.
    pub(crate) fn push(&mut self, lo_type: LoType, los: Vec<NodeId>) -> bool {
        if los.is_empty() || self.contains(&lo_type) {
            return false;
        }
        self.0.push((lo_type, los));
        true
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

/// A course tree and everything computed over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    nodes: Vec<Lo>,
    pub course_id: String,
    pub course_url: String,
    pub properties: Properties,
    /// Wall type -> nodes of that type in document order. Types with no
    /// nodes are absent.
    pub walls: Walls,
    pub index: HashMap<Route, NodeId>,
    pub companions: Companions,
    pub wall_bar: Vec<CompanionItem>,
    pub flags: CourseFlags,
}

impl Course {
    /// Move a raw tree into a new arena.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::NotACourse` if the root is not a course.
    ///
    /// # Example
    ///
    /// ```
    /// use tutorweave::core::course::Course;
    /// use tutorweave::core::lo::RawLo;
    /// use tutorweave::core::types::LoType;
    ///
    /// let raw = RawLo::new(LoType::Course, "course", "/course")
    ///     .with_child(RawLo::new(LoType::Topic, "t1", "/topic/t1"));
    /// let course = Course::from_raw(raw).unwrap();
    ///
    /// assert_eq!(course.len(), 2);
    /// assert_eq!(course.node(course.root()).children.len(), 1);
    /// ```
    pub fn from_raw(mut raw: RawLo) -> Result<Self, TreeError> {
        if raw.lo_type != LoType::Course {
            return Err(TreeError::NotACourse(raw.lo_type.to_string()));
        }

        let properties = std::mem::take(&mut raw.properties);
        let mut nodes: Vec<Lo> = Vec::new();
        let mut stack: Vec<(RawLo, Option<NodeId>)> = vec![(raw, None)];

        while let Some((raw, parent)) = stack.pop() {
            let id = NodeId(nodes.len());
            let (lo, children) = Lo::from_raw(raw);
            nodes.push(lo);
            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }
            // Reversed so the first child is allocated (and linked) first.
            stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
        }

        Ok(Self {
            nodes,
            course_id: String::new(),
            course_url: String::new(),
            properties,
            walls: Walls::default(),
            index: HashMap::new(),
            companions: Companions::default(),
            wall_bar: Vec::new(),
            flags: CourseFlags::default(),
        })
    }

    /// The course root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not handed out by this arena.
    pub fn node(&self, id: NodeId) -> &Lo {
        &self.nodes[id.0]
    }

    /// Get a node by id, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Lo {
        &mut self.nodes[id.0]
    }

    /// Get a node by id, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&Lo> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A course always has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all node ids in arena (document) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterate all nodes mutably.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Lo> {
        self.nodes.iter_mut()
    }

    /// Pre-order traversal from `start`, following child edges.
    ///
    /// Uses an explicit stack, so depth is bounded only by memory.
    pub fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        order
    }

    /// Look up a node by route through the index.
    pub fn lookup(&self, route: &str) -> Option<&Lo> {
        self.lookup_id(route).map(|id| self.node(id))
    }

    /// Look up a node id by route through the index.
    pub fn lookup_id(&self, route: &str) -> Option<NodeId> {
        self.index.get(&Route::new(route)).copied()
    }

    /// The wall for a type. Absent walls read as empty.
    pub fn wall(&self, lo_type: &LoType) -> &[NodeId] {
        self.walls.get(lo_type).unwrap_or_default()
    }

    /// Routes of a node's breadcrumb chain, root first.
    pub fn breadcrumb_routes(&self, id: NodeId) -> Vec<&Route> {
        self.node(id)
            .breadcrumbs
            .iter()
            .map(|crumb| &self.node(*crumb).route)
            .collect()
    }

    /// Clear every computed field so a pass starts from scratch.
    pub(crate) fn reset_decorations(&mut self) {
        for lo in &mut self.nodes {
            lo.reset_decorations();
        }
        self.walls.clear();
        self.index.clear();
        self.companions = Companions::default();
        self.wall_bar.clear();
        self.flags = CourseFlags::default();
    }

    /// Hash the decorated structure of the course.
    ///
    /// Covers, per node: type, parent, breadcrumbs, groupings and rendered
    /// content; plus walls and index keys.
    pub fn fingerprint(&self) -> Fingerprint {
        let route = |id: &NodeId| self.node(*id).route.as_str();
        let routes = |ids: &[NodeId]| ids.iter().map(route).collect::<Vec<_>>().join(",");

        let mut entries: Vec<(String, String)> = Vec::with_capacity(self.nodes.len() + 8);
        for (position, lo) in self.nodes.iter().enumerate() {
            let mut payload = format!(
                "{}|{}|{}|{}",
                lo.lo_type,
                lo.parent.as_ref().map(route).unwrap_or_default(),
                routes(&lo.breadcrumbs),
                lo.content_html,
            );
            if let Some(panels) = &lo.panels {
                payload.push_str(&format!(
                    "|pv:{}|pt:{}|pn:{}",
                    routes(&panels.panel_videos),
                    routes(&panels.panel_talks),
                    routes(&panels.panel_notes)
                ));
            }
            if let Some(units) = &lo.units {
                payload.push_str(&format!(
                    "|u:{}|s:{}|std:{}",
                    routes(&units.units),
                    routes(&units.sides),
                    routes(&units.standard_los)
                ));
            }
            entries.push((format!("node:{position}:{}", lo.route), payload));
        }
        for (lo_type, los) in self.walls.iter() {
            entries.push((format!("wall:{lo_type}"), routes(los)));
        }
        for (key, id) in &self.index {
            entries.push((format!("index:{key}"), id.to_string()));
        }

        Fingerprint::compute(&entries)
    }
}
