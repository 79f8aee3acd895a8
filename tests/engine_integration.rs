//! Integration tests for the decoration pass.
//!
//! These tests load course trees in the tutors.json layout and run the
//! full pass: Decorate → Inject → Walls → Index → Link → Flags.

use serde_json::json;

use tutorweave::core::course::Course;
use tutorweave::core::lo::RawLo;
use tutorweave::core::types::{CollisionPolicy, LoType, NodeId, Route};
use tutorweave::engine::{CourseView, Engine, EngineError, EngineOptions, IndexError};

// =============================================================================
// Test Fixtures
// =============================================================================

/// A course with one topic holding a lab with three steps and a panel note.
fn scenario_json() -> serde_json::Value {
    json!({
        "id": "web-dev",
        "type": "course",
        "route": "/course/{{COURSEURL}}",
        "title": "Web Development",
        "properties": {"slack": "https://slack.example/web-dev"},
        "los": [{
            "id": "topic-01",
            "type": "topic",
            "route": "/topic/{{COURSEURL}}/topic-01",
            "title": "Week 1",
            "summary": "Getting *started*",
            "frontMatter": {"icon": {"type": "fluent:book-24", "color": "blue"}},
            "los": [
                {
                    "id": "lab-01",
                    "type": "lab",
                    "route": "/lab/{{COURSEURL}}/topic-01/lab-01",
                    "title": "Lab 1",
                    "img": "https://{{COURSEURL}}/topic-01/lab-01/img/main.png",
                    "los": [
                        {"id": "00.Setup", "type": "step", "route": "/lab/{{COURSEURL}}/topic-01/lab-01/00", "contentMd": "# Setup\n\nInstall the tools."},
                        {"id": "01.Build", "type": "step", "route": "/lab/{{COURSEURL}}/topic-01/lab-01/01", "contentMd": "Run `make`."},
                        {"id": "02.Done", "type": "step", "route": "/lab/{{COURSEURL}}/topic-01/lab-01/02", "contentMd": "![shot](img/done.png)"}
                    ]
                },
                {
                    "id": "welcome",
                    "type": "panelnote",
                    "route": "/note/{{COURSEURL}}/topic-01/welcome",
                    "title": "Welcome",
                    "contentMd": "See ![map](./img/map.png)"
                }
            ]
        }]
    })
}

fn load(value: serde_json::Value) -> Course {
    let raw: RawLo = serde_json::from_value(value).expect("valid tutors.json");
    Course::from_raw(raw).expect("root is a course")
}

fn options() -> EngineOptions {
    EngineOptions {
        course_id: Some("web-dev".into()),
        course_url: Some("web-dev.netlify.app".into()),
        ..Default::default()
    }
}

fn ids(course: &Course, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|id| course.node(*id).id.clone()).collect()
}

// =============================================================================
// Scenario
// =============================================================================

mod scenario {
    use super::*;

    #[test]
    fn topic_groupings() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        let topic = course.lookup("/topic/web-dev/topic-01").unwrap();
        let units = topic.units.as_ref().unwrap();
        let panels = topic.panels.as_ref().unwrap();

        assert_eq!(ids(&course, &units.standard_los), vec!["lab-01"]);
        assert!(units.units.is_empty());
        assert!(units.sides.is_empty());
        assert_eq!(ids(&course, &panels.panel_notes), vec!["welcome"]);
        assert!(panels.panel_talks.is_empty());
        assert!(panels.panel_videos.is_empty());
    }

    #[test]
    fn steps_are_rendered() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        let lab = course.lookup_id("/lab/web-dev/topic-01/lab-01").unwrap();
        let steps = &course.node(lab).children;
        assert_eq!(steps.len(), 3);
        for step in steps {
            let step = course.node(*step);
            assert!(!step.content_html.is_empty(), "{} not rendered", step.id);
            assert_eq!(step.parent, Some(lab));
            assert_eq!(step.breadcrumbs.len(), 4);
        }
        assert!(course.node(steps[0]).content_html.contains("<h1>Setup</h1>"));
    }

    #[test]
    fn panel_note_assets_are_prefixed() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        let note = course.lookup("/note/web-dev/topic-01/welcome").unwrap();
        assert!(note.content_html.contains("src=\"welcome/img/map.png\""));
    }

    #[test]
    fn walls_are_type_exact() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        assert_eq!(ids(&course, course.wall(&LoType::Lab)), vec!["lab-01"]);
        // A panel note is grouped as a panel, not shown on the note wall.
        assert!(course.wall(&LoType::Note).is_empty());
        assert!(course.wall(&LoType::PanelNote).is_empty());
    }

    #[test]
    fn note_wall_holds_the_note() {
        let mut value = scenario_json();
        value["los"][0]["los"][1]["type"] = json!("note");
        let mut course = load(value);
        Engine::new(options()).run(&mut course).unwrap();

        assert_eq!(ids(&course, course.wall(&LoType::Note)), vec!["welcome"]);
        let topic = course.lookup("/topic/web-dev/topic-01").unwrap();
        assert_eq!(
            ids(&course, &topic.units.as_ref().unwrap().standard_los),
            vec!["lab-01", "welcome"]
        );
    }

    #[test]
    fn index_covers_every_node() {
        let mut course = load(scenario_json());
        let report = Engine::new(options()).run(&mut course).unwrap();

        assert_eq!(report.index.entries, 7);
        assert!(report.index.collisions.is_empty());
        for route in [
            "/course/web-dev",
            "/topic/web-dev/topic-01",
            "/lab/web-dev/topic-01/lab-01",
            "/note/web-dev/topic-01/welcome",
            "/lab/web-dev/topic-01/lab-01/00",
            "/lab/web-dev/topic-01/lab-01/01",
            "/lab/web-dev/topic-01/lab-01/02",
        ] {
            assert!(course.lookup(route).is_some(), "{route} missing");
        }
    }

    #[test]
    fn course_url_injected_into_assets() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        let lab = course.lookup("/lab/web-dev/topic-01/lab-01").unwrap();
        assert_eq!(
            lab.img.as_deref(),
            Some("https://web-dev.netlify.app/topic-01/lab-01/img/main.png")
        );
    }

    #[test]
    fn icon_from_front_matter() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        let topic = course.lookup("/topic/web-dev/topic-01").unwrap();
        let icon = topic.icon.as_ref().unwrap();
        assert_eq!(icon.icon_type, "fluent:book-24");
        assert_eq!(icon.color, "blue");
        assert!(topic.summary_html.contains("<em>started</em>"));
    }

    #[test]
    fn companions_and_wall_bar() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        assert!(course.companions.show);
        assert_eq!(course.companions.bar[0].icon, "slack");
        assert_eq!(course.wall_bar.len(), 1);
        assert_eq!(course.wall_bar[0].link, "/wall/lab/web-dev");
        assert!(!course.flags.is_portfolio);
        assert!(course.flags.are_videos_hidden);
    }
}

// =============================================================================
// Pass Invariants
// =============================================================================

mod invariants {
    use super::*;

    #[test]
    fn idempotent_pass() {
        let mut course = load(scenario_json());
        let engine = Engine::new(options());

        let first = engine.run(&mut course).unwrap();
        let first_view = serde_json::to_value(CourseView::new(&course)).unwrap();
        let second = engine.run(&mut course).unwrap();
        let second_view = serde_json::to_value(CourseView::new(&course)).unwrap();

        assert_eq!(first.fingerprint, second.fingerprint);
        assert_eq!(first_view, second_view);
    }

    #[test]
    fn breadcrumbs_start_at_root_and_end_at_node() {
        let mut course = load(scenario_json());
        Engine::new(options()).run(&mut course).unwrap();

        for id in course.ids() {
            let crumbs = &course.node(id).breadcrumbs;
            assert_eq!(crumbs.first(), Some(&course.root()));
            assert_eq!(crumbs.last(), Some(&id));
            for pair in crumbs.windows(2) {
                assert_eq!(course.node(pair[1]).parent, Some(pair[0]));
            }
        }
    }

    #[test]
    fn ordering_follows_hints() {
        let mut value = json!({
            "id": "c", "type": "course", "route": "/c",
            "los": [
                {"id": "A", "type": "talk", "route": "/a", "frontMatter": {"order": 2}},
                {"id": "B", "type": "talk", "route": "/b"},
                {"id": "C", "type": "talk", "route": "/c/c", "frontMatter": {"order": "1"}},
                {"id": "D", "type": "talk", "route": "/d"}
            ]
        });
        let mut course = load(value.take());
        Engine::new(EngineOptions::default()).run(&mut course).unwrap();

        let root = course.node(course.root());
        let standard = &root.units.as_ref().unwrap().standard_los;
        assert_eq!(ids(&course, standard), vec!["C", "A", "B", "D"]);
        // Author order is untouched.
        assert_eq!(ids(&course, &root.children), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn zero_order_sorts_with_unordered() {
        let mut course = load(json!({
            "id": "c", "type": "course", "route": "/c",
            "los": [
                {"id": "Z", "type": "talk", "route": "/z", "frontMatter": {"order": 0}},
                {"id": "B", "type": "talk", "route": "/b"},
                {"id": "A", "type": "talk", "route": "/a", "frontMatter": {"order": 1}}
            ]
        }));
        Engine::new(EngineOptions::default()).run(&mut course).unwrap();

        let root = course.node(course.root());
        let standard = &root.units.as_ref().unwrap().standard_los;
        assert_eq!(ids(&course, standard), vec!["A", "Z", "B"]);
    }

    #[test]
    fn unknown_types_are_standard_leaves() {
        let mut course = load(json!({
            "id": "c", "type": "course", "route": "/c",
            "los": [{
                "id": "x", "type": "podcast", "route": "/x",
                "los": [{"id": "y", "type": "talk", "route": "/x/y"}]
            }]
        }));
        Engine::new(EngineOptions::default()).run(&mut course).unwrap();

        let x = course.lookup("/x").unwrap();
        assert_eq!(x.lo_type, LoType::Unknown("podcast".into()));
        assert!(x.units.is_none());
        let y = course.lookup_id("/x/y").unwrap();
        assert_eq!(course.node(y).breadcrumbs.len(), 3);
        assert_eq!(ids(&course, course.wall(&LoType::Talk)), vec!["y"]);
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    fn duplicate_routes() -> Course {
        load(json!({
            "id": "c", "type": "course", "route": "/c",
            "los": [
                {"id": "first", "type": "note", "route": "/same"},
                {"id": "second", "type": "note", "route": "/same"}
            ]
        }))
    }

    #[test]
    fn collisions_reported_under_last_write_wins() {
        let mut course = duplicate_routes();
        let report = Engine::new(EngineOptions::default()).run(&mut course).unwrap();

        assert_eq!(report.index.collisions.len(), 1);
        assert_eq!(report.index.collisions[0].route, Route::new("/same"));
        assert_eq!(course.lookup("/same").unwrap().id, "second");
    }

    #[test]
    fn collisions_rejected_on_request() {
        let mut course = duplicate_routes();
        let err = Engine::new(EngineOptions {
            collision_policy: CollisionPolicy::Reject,
            ..Default::default()
        })
        .run(&mut course)
        .unwrap_err();

        assert!(matches!(
            err,
            EngineError::Index(IndexError::RouteCollision { .. })
        ));
    }

    #[test]
    fn root_must_be_a_course() {
        let raw: RawLo =
            serde_json::from_value(json!({"id": "t", "type": "topic", "route": "/t"})).unwrap();
        assert!(Course::from_raw(raw).is_err());
    }
}
