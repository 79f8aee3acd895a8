//! core::lo
//!
//! Learning objects: the raw form read from course JSON and the arena form
//! the engine decorates.
//!
//! # Lifecycle
//!
//! A [`RawLo`] tree is produced by deserializing `tutors.json`. It is moved
//! into a [`crate::core::course::Course`] arena exactly once, becoming a set
//! of [`Lo`] nodes addressed by [`NodeId`]. Decoration then fills in the
//! computed fields of every `Lo` in place.
//!
//! Computed fields are never read from input and never written by anything
//! other than the engine.

use serde::{Deserialize, Serialize};

use super::types::{FrontMatter, IconType, LoType, NodeId, Properties, Route};

/// A learning object as it appears in course JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLo {
    pub id: String,
    pub route: Route,
    #[serde(rename = "type")]
    pub lo_type: LoType,
    pub title: String,
    pub short_title: String,
    pub summary: Option<String>,
    pub content_md: Option<String>,
    pub front_matter: FrontMatter,
    pub img: Option<String>,
    pub video: Option<String>,
    pub pdf: Option<String>,
    pub hide: bool,
    /// Only meaningful on the course root.
    pub properties: Properties,
    pub los: Vec<RawLo>,
}

impl RawLo {
    /// Create a raw learning object with the given identity.
    pub fn new(lo_type: LoType, id: impl Into<String>, route: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            route: Route::new(route),
            lo_type,
            ..Default::default()
        }
    }

    /// Builder-style: set the markdown body.
    pub fn with_content(mut self, markdown: impl Into<String>) -> Self {
        self.content_md = Some(markdown.into());
        self
    }

    /// Builder-style: set the markdown summary.
    pub fn with_summary(mut self, markdown: impl Into<String>) -> Self {
        self.summary = Some(markdown.into());
        self
    }

    /// Builder-style: set a front matter attribute.
    pub fn with_front_matter(mut self, key: &str, value: serde_json::Value) -> Self {
        self.front_matter.insert(key, value);
        self
    }

    /// Builder-style: append a child.
    pub fn with_child(mut self, child: RawLo) -> Self {
        self.los.push(child);
        self
    }
}

/// Panel children of a composite learning object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panels {
    pub panel_videos: Vec<NodeId>,
    pub panel_talks: Vec<NodeId>,
    pub panel_notes: Vec<NodeId>,
}

impl Panels {
    /// Iterate every panel child.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.panel_videos
            .iter()
            .chain(&self.panel_talks)
            .chain(&self.panel_notes)
            .copied()
    }
}

/// Unit, side and standard children of a composite learning object.
///
/// `standard_los` is order-resolved; `units` and `sides` keep document
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Units {
    pub units: Vec<NodeId>,
    pub sides: Vec<NodeId>,
    pub standard_los: Vec<NodeId>,
}

impl Units {
    /// Iterate every non-panel child.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.units
            .iter()
            .chain(&self.sides)
            .chain(&self.standard_los)
            .copied()
    }
}

/// Route and asset links as authored, before course URL injection.
///
/// Injection always starts from these, so a later pass with a different
/// course identity rewrites the links instead of keeping the first ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoredLinks {
    pub route: Route,
    pub img: Option<String>,
    pub video: Option<String>,
    pub pdf: Option<String>,
}

/// A learning object inside a course arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Lo {
    pub id: String,
    pub route: Route,
    pub lo_type: LoType,
    pub title: String,
    pub short_title: String,
    pub summary_md: String,
    pub content_md: String,
    pub front_matter: FrontMatter,
    pub img: Option<String>,
    pub video: Option<String>,
    pub pdf: Option<String>,
    pub hide: bool,
    pub children: Vec<NodeId>,
    pub authored: AuthoredLinks,

    // Computed by the decorator.
    pub summary_html: String,
    pub content_html: String,
    pub parent: Option<NodeId>,
    pub root_course: Option<NodeId>,
    pub breadcrumbs: Vec<NodeId>,
    pub icon: Option<IconType>,
    pub panels: Option<Panels>,
    pub units: Option<Units>,
}

impl Lo {
    /// Convert the author-supplied fields of a raw node.
    ///
    /// Children are linked by the arena, not here.
    pub(crate) fn from_raw(raw: RawLo) -> (Self, Vec<RawLo>) {
        let authored = AuthoredLinks {
            route: raw.route.clone(),
            img: raw.img.clone(),
            video: raw.video.clone(),
            pdf: raw.pdf.clone(),
        };
        let lo = Self {
            id: raw.id,
            route: raw.route,
            lo_type: raw.lo_type,
            title: raw.title,
            short_title: raw.short_title,
            summary_md: raw.summary.unwrap_or_default(),
            content_md: raw.content_md.unwrap_or_default(),
            front_matter: raw.front_matter,
            img: raw.img,
            video: raw.video,
            pdf: raw.pdf,
            hide: raw.hide,
            children: Vec::new(),
            authored,
            summary_html: String::new(),
            content_html: String::new(),
            parent: None,
            root_course: None,
            breadcrumbs: Vec::new(),
            icon: None,
            panels: None,
            units: None,
        };
        (lo, raw.los)
    }

    /// Clear everything the decorator computes.
    pub(crate) fn reset_decorations(&mut self) {
        self.summary_html.clear();
        self.content_html.clear();
        self.parent = None;
        self.root_course = None;
        self.breadcrumbs.clear();
        self.icon = None;
        self.panels = None;
        self.units = None;
    }

    /// Check whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Display title, preferring the short title when set.
    pub fn display_title(&self) -> &str {
        if self.short_title.is_empty() {
            &self.title
        } else {
            &self.short_title
        }
    }
}
