//! engine::export
//!
//! Serializable projection of a decorated course.
//!
//! Arena ids mean nothing outside the process, so every node reference in
//! the view is written as the referenced node's route.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::core::course::{CompanionItem, Companions, Course, CourseFlags};
use crate::core::types::{FrontMatter, IconType, NodeId, Route};

/// Panel groupings, as routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelsView {
    pub panel_videos: Vec<Route>,
    pub panel_talks: Vec<Route>,
    pub panel_notes: Vec<Route>,
}

/// Unit groupings, as routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitsView {
    pub units: Vec<Route>,
    pub sides: Vec<Route>,
    pub standard_los: Vec<Route>,
}

/// A decorated learning object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoView {
    pub id: String,
    pub route: Route,
    #[serde(rename = "type")]
    pub lo_type: String,
    pub title: String,
    pub short_title: String,
    pub summary: String,
    pub content_html: String,
    #[serde(skip_serializing_if = "FrontMatter::is_empty")]
    pub front_matter: FrontMatter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    pub hide: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Route>,
    pub bread_crumbs: Vec<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panels: Option<PanelsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitsView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub los: Vec<LoView>,
}

/// Walls as a JSON object, keys in wall order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallsView(pub Vec<(String, Vec<Route>)>);

impl Serialize for WallsView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (lo_type, routes) in &self.0 {
            map.serialize_entry(lo_type, routes)?;
        }
        map.end()
    }
}

/// A decorated course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub course_id: String,
    pub course_url: String,
    #[serde(flatten)]
    pub flags: CourseFlags,
    pub companions: Companions,
    pub wall_bar: Vec<CompanionItem>,
    pub walls: WallsView,
    /// Every indexed route, sorted.
    pub index: Vec<Route>,
    pub lo: LoView,
}

impl CourseView {
    /// Project a decorated course.
    pub fn new(course: &Course) -> Self {
        let walls = WallsView(
            course
                .walls
                .iter()
                .map(|(lo_type, los)| (lo_type.to_string(), routes(course, los)))
                .collect(),
        );
        let mut index: Vec<Route> = course.index.keys().cloned().collect();
        index.sort();

        Self {
            course_id: course.course_id.clone(),
            course_url: course.course_url.clone(),
            flags: course.flags,
            companions: course.companions.clone(),
            wall_bar: course.wall_bar.clone(),
            walls,
            index,
            lo: LoView::new(course, course.root()),
        }
    }
}

impl LoView {
    /// Project a node and its subtree.
    ///
    /// Built bottom-up over an explicit stack, so deep trees do not recurse.
    pub fn new(course: &Course, id: NodeId) -> Self {
        let order = course.preorder(id);
        let mut built: Vec<Option<LoView>> = vec![None; course.len()];

        for &node in order.iter().rev() {
            let los = course
                .node(node)
                .children
                .iter()
                .filter_map(|child| built[child.index()].take())
                .collect();
            built[node.index()] = Some(Self::single(course, node, los));
        }

        built[id.index()]
            .take()
            .unwrap_or_else(|| Self::single(course, id, Vec::new()))
    }

    fn single(course: &Course, id: NodeId, los: Vec<LoView>) -> Self {
        let lo = course.node(id);
        let route_of = |id: NodeId| course.node(id).route.clone();

        Self {
            id: lo.id.clone(),
            route: lo.route.clone(),
            lo_type: lo.lo_type.to_string(),
            title: lo.title.clone(),
            short_title: lo.short_title.clone(),
            summary: lo.summary_html.clone(),
            content_html: lo.content_html.clone(),
            front_matter: lo.front_matter.clone(),
            img: lo.img.clone(),
            video: lo.video.clone(),
            pdf: lo.pdf.clone(),
            hide: lo.hide,
            icon: lo.icon.clone(),
            parent: lo.parent.map(route_of),
            bread_crumbs: routes(course, &lo.breadcrumbs),
            panels: lo.panels.as_ref().map(|p| PanelsView {
                panel_videos: routes(course, &p.panel_videos),
                panel_talks: routes(course, &p.panel_talks),
                panel_notes: routes(course, &p.panel_notes),
            }),
            units: lo.units.as_ref().map(|u| UnitsView {
                units: routes(course, &u.units),
                sides: routes(course, &u.sides),
                standard_los: routes(course, &u.standard_los),
            }),
            los,
        }
    }
}

fn routes(course: &Course, ids: &[NodeId]) -> Vec<Route> {
    ids.iter().map(|id| course.node(*id).route.clone()).collect()
}
