//! engine::companions
//!
//! Companion linking: the last stage of a pass.
//!
//! # Architecture
//!
//! The engine only knows the [`CompanionLinker`] trait. The default
//! [`PropertyCompanions`] linker builds two link bars from the indexed
//! course:
//! - the companion bar, from well-known course properties (`slack`, `zoom`,
//!   ...) and the free-form `companions` property
//! - the wall bar, one entry per non-empty wall
//!
//! Linkers may add cross references but must not touch parent, breadcrumb,
//! grouping, wall or index data.

use serde_json::Value;
use thiserror::Error;

use crate::core::course::{CompanionItem, Companions, Course};
use crate::core::types::Properties;

/// Errors from companion linking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid companion '{key}': {reason}")]
    InvalidCompanion { key: String, reason: String },
}

/// Post-processes a fully decorated and indexed course.
pub trait CompanionLinker {
    /// Attach companion resources to the course.
    fn link(&self, course: &mut Course) -> Result<(), LinkError>;
}

/// A linker that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompanions;

impl CompanionLinker for NoCompanions {
    fn link(&self, _course: &mut Course) -> Result<(), LinkError> {
        Ok(())
    }
}

/// Well-known companion properties: (key, tip).
const KNOWN_COMPANIONS: [(&str, &str); 5] = [
    ("slack", "Go to module Slack channel"),
    ("zoom", "Go to module Zoom meeting"),
    ("moodle", "Go to module Moodle page"),
    ("youtube", "Go to module YouTube channel"),
    ("teams", "Go to module Teams meeting"),
];

/// The default linker, driven by course properties and walls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyCompanions;

impl CompanionLinker for PropertyCompanions {
    fn link(&self, course: &mut Course) -> Result<(), LinkError> {
        let bar = companion_bar(&course.properties)?;
        course.companions = Companions {
            show: !bar.is_empty(),
            bar,
        };
        course.wall_bar = wall_bar(course);
        Ok(())
    }
}

/// Build the companion bar from course properties.
///
/// Well-known keys come first, in fixed order. Entries of the `companions`
/// property follow in key order; each must be an object with a `link` and
/// may carry a `title`.
///
/// # Errors
///
/// Returns `LinkError::InvalidCompanion` for a `companions` entry without a
/// string `link`.
pub fn companion_bar(properties: &Properties) -> Result<Vec<CompanionItem>, LinkError> {
    let mut bar: Vec<CompanionItem> = KNOWN_COMPANIONS
        .iter()
        .filter_map(|(key, tip)| {
            properties.get_string(key).map(|link| CompanionItem {
                link,
                icon: (*key).to_string(),
                target: "_blank".to_string(),
                tip: (*tip).to_string(),
            })
        })
        .collect();

    if let Some(Value::Object(extra)) = properties.get("companions") {
        for (key, companion) in extra {
            let invalid = |reason: &str| LinkError::InvalidCompanion {
                key: key.clone(),
                reason: reason.to_string(),
            };
            let companion = companion
                .as_object()
                .ok_or_else(|| invalid("expected an object"))?;
            let link = companion
                .get("link")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid("missing 'link'"))?;
            let tip = companion
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(key.as_str());
            bar.push(CompanionItem {
                link: link.to_string(),
                icon: key.clone(),
                target: "_blank".to_string(),
                tip: tip.to_string(),
            });
        }
    }

    Ok(bar)
}

/// Build the wall bar: one link per non-empty wall, in the order the
/// walls were built.
pub fn wall_bar(course: &Course) -> Vec<CompanionItem> {
    course
        .walls
        .types()
        .map(|lo_type| CompanionItem {
            link: format!("/wall/{}/{}", lo_type, course.course_id),
            icon: lo_type.to_string(),
            target: String::new(),
            tip: format!("All {lo_type}s in this module"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lo::RawLo;
    use crate::core::types::LoType;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn known_companions_in_fixed_order() {
        let bar = companion_bar(&props(json!({
            "teams": "https://teams.example",
            "slack": "https://slack.example",
            "title": "not a companion"
        })))
        .unwrap();

        let icons: Vec<_> = bar.iter().map(|c| c.icon.as_str()).collect();
        assert_eq!(icons, vec!["slack", "teams"]);
        assert_eq!(bar[0].link, "https://slack.example");
        assert_eq!(bar[0].target, "_blank");
        assert_eq!(bar[0].tip, "Go to module Slack channel");
    }

    #[test]
    fn free_form_companions() {
        let bar = companion_bar(&props(json!({
            "companions": {
                "discord": {"link": "https://discord.example", "title": "Chat"},
                "wiki": {"link": "https://wiki.example"}
            }
        })))
        .unwrap();

        assert_eq!(bar.len(), 2);
        assert_eq!(bar[0].icon, "discord");
        assert_eq!(bar[0].tip, "Chat");
        assert_eq!(bar[1].icon, "wiki");
        assert_eq!(bar[1].tip, "wiki");
    }

    #[test]
    fn free_form_companion_needs_link() {
        let err = companion_bar(&props(json!({
            "companions": {"discord": {"title": "Chat"}}
        })))
        .unwrap_err();
        assert_eq!(
            err,
            LinkError::InvalidCompanion {
                key: "discord".into(),
                reason: "missing 'link'".into()
            }
        );
    }

    #[test]
    fn link_sets_show_flag() {
        let mut raw = RawLo::new(LoType::Course, "c", "/c");
        raw.properties.insert("zoom", json!("https://zoom.example"));
        let mut course = Course::from_raw(raw).unwrap();

        PropertyCompanions.link(&mut course).unwrap();
        assert!(course.companions.show);
        assert_eq!(course.companions.bar.len(), 1);

        let mut bare = Course::from_raw(RawLo::new(LoType::Course, "c", "/c")).unwrap();
        PropertyCompanions.link(&mut bare).unwrap();
        assert!(!bare.companions.show);
        assert!(bare.companions.bar.is_empty());
    }

    #[test]
    fn wall_bar_per_wall() {
        let raw = RawLo::new(LoType::Course, "c", "/c")
            .with_child(RawLo::new(LoType::Talk, "t", "/t"))
            .with_child(RawLo::new(LoType::Lab, "l", "/l"));
        let mut course = Course::from_raw(raw).unwrap();
        course.course_id = "oop".into();
        crate::engine::walls::build_walls(&mut course, &crate::core::classify::wall_types());

        let bar = wall_bar(&course);
        let links: Vec<_> = bar.iter().map(|c| c.link.as_str()).collect();
        assert_eq!(links, vec!["/wall/talk/oop", "/wall/lab/oop"]);
        assert_eq!(bar[0].tip, "All talks in this module");

        crate::engine::walls::build_walls(&mut course, &[LoType::Lab, LoType::Talk]);
        let links: Vec<_> = wall_bar(&course).into_iter().map(|c| c.link).collect();
        assert_eq!(links, vec!["/wall/lab/oop", "/wall/talk/oop"]);
    }

    #[test]
    fn no_companions_leaves_course_alone() {
        let mut course = Course::from_raw(RawLo::new(LoType::Course, "c", "/c")).unwrap();
        let before = course.clone();
        NoCompanions.link(&mut course).unwrap();
        assert_eq!(course, before);
    }
}
