//! core::classify
//!
//! Structural classification of learning objects and sibling ordering.
//!
//! Everything here is a pure function of type tags or order hints; the
//! decorator combines them into per-node groupings.

use super::types::LoType;

/// The bucket a child lands in under a composite parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PanelVideo,
    PanelTalk,
    PanelNote,
    Unit,
    Side,
    Standard,
}

impl Category {
    /// Check whether this is one of the panel buckets.
    pub fn is_panel(self) -> bool {
        matches!(
            self,
            Category::PanelVideo | Category::PanelTalk | Category::PanelNote
        )
    }
}

/// Classify a child by type.
///
/// Anything that is not a panel, unit or side is standard, including
/// unknown tags.
pub fn classify(lo_type: &LoType) -> Category {
    match lo_type {
        LoType::PanelVideo => Category::PanelVideo,
        LoType::PanelTalk => Category::PanelTalk,
        LoType::PanelNote => Category::PanelNote,
        LoType::Unit => Category::Unit,
        LoType::Side => Category::Side,
        LoType::Course
        | LoType::Topic
        | LoType::Lab
        | LoType::Step
        | LoType::Talk
        | LoType::Note
        | LoType::Video
        | LoType::Web
        | LoType::Github
        | LoType::Archive
        | LoType::Unknown(_) => Category::Standard,
    }
}

/// Check whether a type is one of the panel kinds.
pub fn is_panel(lo_type: &LoType) -> bool {
    classify(lo_type).is_panel()
}

/// Check whether a type gets panel and unit groupings.
pub fn is_composite(lo_type: &LoType) -> bool {
    match lo_type {
        LoType::Course | LoType::Topic | LoType::Unit | LoType::Side => true,
        LoType::Lab
        | LoType::Step
        | LoType::Talk
        | LoType::Note
        | LoType::Video
        | LoType::PanelVideo
        | LoType::PanelTalk
        | LoType::PanelNote
        | LoType::Web
        | LoType::Github
        | LoType::Archive
        | LoType::Unknown(_) => false,
    }
}

/// Check whether a type may be collected onto a course wall.
pub fn is_wall_type(lo_type: &LoType) -> bool {
    match lo_type {
        LoType::Talk
        | LoType::Note
        | LoType::Lab
        | LoType::Web
        | LoType::Archive
        | LoType::Github => true,
        LoType::Course
        | LoType::Topic
        | LoType::Unit
        | LoType::Side
        | LoType::Step
        | LoType::Video
        | LoType::PanelVideo
        | LoType::PanelTalk
        | LoType::PanelNote
        | LoType::Unknown(_) => false,
    }
}

/// The wall types, in the order walls are built.
pub fn wall_types() -> Vec<LoType> {
    vec![
        LoType::Talk,
        LoType::Note,
        LoType::Lab,
        LoType::Web,
        LoType::Archive,
        LoType::Github,
    ]
}

/// Resolve sibling order.
///
/// Items with an order hint come first, ascending by hint; ties keep their
/// input order. Items without a hint follow, in input order.
///
/// `slice::sort_by` is documented as stable, which is what keeps ties in
/// place.
///
/// # Example
///
/// ```
/// use tutorweave::core::classify::sort_los;
///
/// let siblings = vec![("A", Some(2.0)), ("B", None), ("C", Some(1.0)), ("D", None)];
/// let sorted = sort_los(siblings, |(_, order)| *order);
/// let names: Vec<_> = sorted.iter().map(|(name, _)| *name).collect();
/// assert_eq!(names, vec!["C", "A", "B", "D"]);
/// ```
pub fn sort_los<T>(los: Vec<T>, order: impl Fn(&T) -> Option<f64>) -> Vec<T> {
    let mut ordered: Vec<(f64, T)> = Vec::new();
    let mut unordered: Vec<T> = Vec::new();
    for lo in los {
        match order(&lo) {
            Some(hint) => ordered.push((hint, lo)),
            None => unordered.push(lo),
        }
    }

    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    ordered
        .into_iter()
        .map(|(_, lo)| lo)
        .chain(unordered)
        .collect()
}
