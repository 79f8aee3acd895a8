//! Property-based tests for the decoration pass.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated course trees.

use proptest::prelude::*;
use serde_json::json;

use tutorweave::core::classify::{is_composite, is_wall_type, sort_los, wall_types};
use tutorweave::core::course::Course;
use tutorweave::core::lo::RawLo;
use tutorweave::core::types::{LoType, NodeId};
use tutorweave::engine::{Engine, EngineOptions};

/// One generated node: its parent slot, type and optional order hint.
#[derive(Debug, Clone)]
struct NodeSpec {
    parent: prop::sample::Index,
    lo_type: LoType,
    order: Option<u8>,
}

/// Strategy for node types below the course root.
fn lo_type() -> impl Strategy<Value = LoType> {
    prop::sample::select(vec![
        LoType::Topic,
        LoType::Lab,
        LoType::Step,
        LoType::Unit,
        LoType::Side,
        LoType::Talk,
        LoType::Note,
        LoType::Web,
        LoType::Github,
        LoType::Archive,
        LoType::Video,
        LoType::PanelVideo,
        LoType::PanelTalk,
        LoType::PanelNote,
        LoType::Unknown("podcast".to_string()),
    ])
}

fn node_spec() -> impl Strategy<Value = NodeSpec> {
    (any::<prop::sample::Index>(), lo_type(), prop::option::of(0u8..4)).prop_map(
        |(parent, lo_type, order)| NodeSpec {
            parent,
            lo_type,
            order,
        },
    )
}

/// Build a raw course from a flat list; node `i` hangs under a node `< i`.
fn build(specs: &[NodeSpec]) -> RawLo {
    let mut slots: Vec<Option<RawLo>> = Vec::with_capacity(specs.len() + 1);
    let mut parents = Vec::with_capacity(specs.len() + 1);
    slots.push(Some(RawLo::new(LoType::Course, "course", "/course")));
    parents.push(0);

    for (i, spec) in specs.iter().enumerate() {
        let index = i + 1;
        let mut raw = RawLo::new(spec.lo_type.clone(), format!("n{index}"), format!("/n/{index}"))
            .with_content(format!("node **{index}**"));
        if let Some(order) = spec.order {
            raw = raw.with_front_matter("order", json!(order));
        }
        slots.push(Some(raw));
        parents.push(spec.parent.index(index));
    }

    for index in (1..slots.len()).rev() {
        if let Some(child) = slots[index].take() {
            if let Some(parent) = slots[parents[index]].as_mut() {
                parent.los.insert(0, child);
            }
        }
    }

    slots[0].take().unwrap_or_default()
}

/// Whether a node sits somewhere below a lab.
fn inside_lab(course: &Course, id: NodeId) -> bool {
    let crumbs = &course.node(id).breadcrumbs;
    crumbs[..crumbs.len() - 1]
        .iter()
        .any(|crumb| course.node(*crumb).lo_type == LoType::Lab)
}

fn decorated(specs: &[NodeSpec]) -> Course {
    let mut course = Course::from_raw(build(specs)).unwrap();
    Engine::new(EngineOptions::default())
        .run(&mut course)
        .unwrap();
    course
}

proptest! {
    /// Hinted items come first in ascending order, ties keep input order,
    /// unhinted items follow in input order.
    #[test]
    fn order_resolver_is_stable(hints in prop::collection::vec(prop::option::of(0u8..5), 0..40)) {
        let items: Vec<(usize, Option<u8>)> = hints.into_iter().enumerate().collect();
        let sorted = sort_los(items.clone(), |(_, hint)| hint.map(f64::from));

        let mut expected: Vec<_> = items.iter().filter(|(_, h)| h.is_some()).cloned().collect();
        expected.sort_by_key(|(position, hint)| (*hint, *position));
        expected.extend(items.iter().filter(|(_, h)| h.is_none()).cloned());

        prop_assert_eq!(sorted, expected);
    }

    /// Every child of a composite node lands in exactly one grouping.
    /// Nothing below a lab is grouped.
    #[test]
    fn groupings_partition_children(specs in prop::collection::vec(node_spec(), 0..60)) {
        let course = decorated(&specs);

        for id in course.ids() {
            let lo = course.node(id);
            if !is_composite(&lo.lo_type) || inside_lab(&course, id) {
                prop_assert!(lo.panels.is_none() && lo.units.is_none());
                continue;
            }
            let panels = lo.panels.as_ref().unwrap();
            let units = lo.units.as_ref().unwrap();
            let mut grouped: Vec<NodeId> = panels.iter().chain(units.iter()).collect();
            let mut children = lo.children.clone();
            grouped.sort();
            children.sort();
            prop_assert_eq!(grouped, children);
        }
    }

    /// Breadcrumbs run from the root to the node through parent links.
    #[test]
    fn breadcrumbs_follow_parents(specs in prop::collection::vec(node_spec(), 0..60)) {
        let course = decorated(&specs);

        for id in course.ids() {
            let crumbs = &course.node(id).breadcrumbs;
            prop_assert_eq!(crumbs.first(), Some(&course.root()));
            prop_assert_eq!(crumbs.last(), Some(&id));
            for pair in crumbs.windows(2) {
                prop_assert_eq!(course.node(pair[1]).parent, Some(pair[0]));
            }
        }
    }

    /// Walls hold exactly the nodes of their type, in document order.
    #[test]
    fn wall_membership(specs in prop::collection::vec(node_spec(), 0..60)) {
        let course = decorated(&specs);
        let order = course.preorder(course.root());

        for lo_type in wall_types() {
            let expected: Vec<NodeId> = order
                .iter()
                .copied()
                .filter(|id| course.node(*id).lo_type == lo_type)
                .collect();
            prop_assert_eq!(course.wall(&lo_type), expected.as_slice());
        }
        for wall_type in course.walls.types() {
            prop_assert!(is_wall_type(wall_type));
        }
    }

    /// Every node is reachable through the index by its route.
    #[test]
    fn index_is_complete(specs in prop::collection::vec(node_spec(), 0..60)) {
        let course = decorated(&specs);

        prop_assert_eq!(course.index.len(), specs.len() + 1);
        for id in course.ids() {
            prop_assert_eq!(course.lookup_id(course.node(id).route.as_str()), Some(id));
        }
    }

    /// A second pass changes nothing.
    #[test]
    fn decoration_is_idempotent(specs in prop::collection::vec(node_spec(), 0..60)) {
        let mut course = decorated(&specs);
        let snapshot = course.clone();

        Engine::new(EngineOptions::default()).run(&mut course).unwrap();

        prop_assert_eq!(course.fingerprint(), snapshot.fingerprint());
        prop_assert_eq!(course, snapshot);
    }
}
