//! engine
//!
//! Orchestrates a decoration pass over a course tree.
//!
//! # Architecture
//!
//! A pass runs these stages in order, each over the whole tree:
//!
//! ```text
//! Decorate -> Inject course URL -> Walls -> Flatten + Index -> Link companions -> Flags
//! ```
//!
//! 1. **Decorate**: ancestry, breadcrumbs, icons, rendered text, groupings
//! 2. **Inject**: resolve `{{COURSEURL}}` in routes and asset links
//! 3. **Walls**: per-type galleries on the course
//! 4. **Index**: route -> node lookup, under an explicit collision policy
//! 5. **Link**: companion resources, through a pluggable linker
//! 6. **Flags**: course switches derived from properties
//!
//! # Invariants
//!
//! - A pass recomputes everything; nothing computed by a previous pass is
//!   read
//! - `&mut Course` gives the pass exclusive access for its duration
//! - The first failing stage aborts the pass; no partial result is
//!   guaranteed after an error
//!
//! # Example
//!
//! ```
//! use tutorweave::core::course::Course;
//! use tutorweave::core::lo::RawLo;
//! use tutorweave::core::types::LoType;
//! use tutorweave::engine::{Engine, EngineOptions};
//!
//! let raw = RawLo::new(LoType::Course, "course", "/course/{{COURSEURL}}")
//!     .with_child(RawLo::new(LoType::Talk, "talk", "/talk/{{COURSEURL}}/talk"));
//! let mut course = Course::from_raw(raw).unwrap();
//!
//! let options = EngineOptions {
//!     course_id: Some("oop".into()),
//!     ..Default::default()
//! };
//! let report = Engine::new(options).run(&mut course).unwrap();
//!
//! assert_eq!(report.nodes, 2);
//! assert!(course.lookup("/talk/oop/talk").is_some());
//! assert_eq!(course.wall(&LoType::Talk).len(), 1);
//! ```

pub mod companions;
pub mod decorate;
pub mod export;
pub mod index;
pub mod inject;
pub mod walls;

pub use companions::{CompanionLinker, LinkError, NoCompanions, PropertyCompanions};
pub use decorate::{decorate, DecorateError};
pub use export::{CourseView, LoView, WallsView};
pub use index::{build_index, flatten, IndexError, IndexReport, RouteCollision};
pub use inject::{
    inject_course_url, resolve_course_identity, COURSE_HOSTS, COURSE_URL_PLACEHOLDER,
};
pub use walls::build_walls;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info_span};

use crate::core::classify::wall_types;
use crate::core::course::{Course, CourseFlags};
use crate::core::types::{CollisionPolicy, Fingerprint, LoType};
use crate::render::{CmarkRenderer, MarkdownOptions, MarkdownRenderer};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory commands resolve relative paths and config against.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Errors from a decoration pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Decorate(#[from] DecorateError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Settings for a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Course id; `None` keeps whatever the course already has.
    pub course_id: Option<String>,
    /// Course URL; `None` keeps whatever the course already has.
    pub course_url: Option<String>,
    /// Types that get a wall.
    pub walls: Vec<LoType>,
    pub collision_policy: CollisionPolicy,
    pub markdown: MarkdownOptions,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            course_id: None,
            course_url: None,
            walls: wall_types(),
            collision_policy: CollisionPolicy::default(),
            markdown: MarkdownOptions::default(),
        }
    }
}

/// Summary of a completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Number of nodes in the tree.
    pub nodes: usize,
    /// Number of non-empty walls.
    pub walls: usize,
    pub index: IndexReport,
    pub fingerprint: Fingerprint,
}

/// Runs decoration passes.
pub struct Engine {
    options: EngineOptions,
    renderer: Box<dyn MarkdownRenderer>,
    linker: Box<dyn CompanionLinker>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create an engine with the default renderer and linker.
    ///
    /// The course id and URL are completed from each other with
    /// [`resolve_course_identity`].
    pub fn new(mut options: EngineOptions) -> Self {
        (options.course_id, options.course_url) =
            resolve_course_identity(options.course_id.as_deref(), options.course_url.as_deref());
        let renderer = CmarkRenderer::new(options.markdown);
        Self {
            options,
            renderer: Box::new(renderer),
            linker: Box::new(PropertyCompanions),
        }
    }

    /// Replace the markdown renderer.
    pub fn with_renderer(mut self, renderer: impl MarkdownRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Replace the companion linker.
    pub fn with_linker(mut self, linker: impl CompanionLinker + 'static) -> Self {
        self.linker = Box::new(linker);
        self
    }

    /// The options this engine runs with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Run a full pass over the course.
    ///
    /// # Errors
    ///
    /// Returns the first stage error: a render failure, a route collision
    /// under `CollisionPolicy::Reject`, or a linker failure.
    pub fn run(&self, course: &mut Course) -> Result<PassReport, EngineError> {
        let span = info_span!("pass", nodes = course.len());
        let _guard = span.enter();

        if let Some(course_id) = &self.options.course_id {
            course.course_id = course_id.clone();
        }
        if let Some(course_url) = &self.options.course_url {
            course.course_url = course_url.clone();
        }

        decorate(course, self.renderer.as_ref())?;
        debug!("decorated");

        inject_course_url(course);

        build_walls(course, &self.options.walls);

        let nodes = flatten(course, course.root());
        let index = build_index(course, &nodes, self.options.collision_policy)?;

        self.linker.link(course)?;
        debug!(companions = course.companions.bar.len(), "linked companions");

        course.flags = CourseFlags::from_properties(&course.properties);

        Ok(PassReport {
            nodes: nodes.len(),
            walls: course.walls.len(),
            index,
            fingerprint: course.fingerprint(),
        })
    }
}
