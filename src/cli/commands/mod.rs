//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads the course tree and configuration for its input
//! 2. Calls the engine to run a decoration pass
//! 3. Formats and displays output
//!
//! Handlers never modify the input file.

mod completion;
mod config_cmd;
mod decorate;
mod lookup;
mod tree;
mod walls;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list};
pub use decorate::decorate;
pub use lookup::lookup;
pub use tree::tree;
pub use walls::walls;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::core::course::Course;
use crate::core::lo::RawLo;
use crate::core::types::CollisionPolicy;
use crate::engine::{Context, Engine, EngineOptions, PassReport};
use crate::ui::output::{self, Verbosity};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Decorate {
            input,
            course_id,
            course_url,
            reject_collisions,
            output,
        } => {
            let overrides = Overrides {
                course_id,
                course_url,
                reject_collisions,
            };
            decorate::decorate(ctx, &input, &overrides, output.as_deref())
        }
        Command::Tree { input } => tree::tree(ctx, &input),
        Command::Walls { input, lo_type } => walls::walls(ctx, &input, lo_type.as_deref()),
        Command::Lookup { input, route } => lookup::lookup(ctx, &input, &route),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Command-line values that take precedence over configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub course_id: Option<String>,
    pub course_url: Option<String>,
    pub reject_collisions: bool,
}

/// A course loaded from disk together with its configuration.
#[derive(Debug)]
pub(crate) struct LoadedCourse {
    pub course: Course,
    pub config: Config,
}

/// Verbosity for a context.
pub(crate) fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.debug)
}

/// Resolve `path` against the context's working directory.
pub(crate) fn resolve(ctx: &Context, path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;
    Ok(cwd.join(path))
}

/// Load configuration for a course directory, reporting warnings.
pub(crate) fn load_config(ctx: &Context, course_dir: &Path) -> Result<Config> {
    let result = Config::load(Some(course_dir)).context("Failed to load config")?;
    for warning in &result.warnings {
        output::warn(&warning.message, verbosity(ctx));
    }
    if let Some(path) = result.config.course_config_loaded_from() {
        output::debug(
            format!("course config: {}", path.display()),
            verbosity(ctx),
        );
    }
    Ok(result.config)
}

/// Read a course tree and the configuration of the directory it lives in.
pub(crate) fn load_course(ctx: &Context, input: &Path) -> Result<LoadedCourse> {
    let path = resolve(ctx, input)?;
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let raw: RawLo = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;
    let course = Course::from_raw(raw)
        .with_context(|| format!("Invalid course tree in '{}'", path.display()))?;
    output::debug(
        format!("loaded {} learning objects", course.len()),
        verbosity(ctx),
    );

    let course_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = load_config(ctx, course_dir)?;

    Ok(LoadedCourse { course, config })
}

/// Engine options from configuration, with command-line overrides applied.
pub fn engine_options(config: &Config, overrides: &Overrides) -> EngineOptions {
    let collision_policy = if overrides.reject_collisions {
        CollisionPolicy::Reject
    } else {
        config.collision_policy()
    };

    EngineOptions {
        course_id: overrides
            .course_id
            .clone()
            .or_else(|| config.course_id().map(str::to_string)),
        course_url: overrides
            .course_url
            .clone()
            .or_else(|| config.course_url().map(str::to_string)),
        walls: config.walls(),
        collision_policy,
        markdown: config.markdown(),
    }
}

/// Load a course and run a pass over it.
pub(crate) fn decorated(
    ctx: &Context,
    input: &Path,
    overrides: &Overrides,
) -> Result<(Course, PassReport)> {
    let LoadedCourse { mut course, config } = load_course(ctx, input)?;
    let engine = Engine::new(engine_options(&config, overrides));
    let report = engine
        .run(&mut course)
        .context("Decoration pass failed")?;

    for collision in &report.index.collisions {
        output::warn(
            format!(
                "route '{}' used more than once; kept {}",
                collision.route,
                course.node(collision.winner).id
            ),
            verbosity(ctx),
        );
    }

    Ok((course, report))
}
