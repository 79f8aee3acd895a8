//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! tutorweave has two configuration scopes:
//! - **Global**: User-level settings
//! - **Course**: Per-course overrides, stored next to the course content
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Course config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$TUTORWEAVE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/tutorweave/config.toml`
//! 3. `~/.tutorweave/config.toml` (canonical)
//!
//! # Course Config Locations
//!
//! Searched in order:
//! 1. `<course dir>/.tutorweave/config.toml` (canonical)
//! 2. `<course dir>/tutorweave.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use tutorweave::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/course"))).unwrap();
//! let config = result.config;
//!
//! println!("Collisions: {}", config.collision_policy());
//! if let Some(id) = config.course_id() {
//!     println!("Course id: {}", id);
//! }
//! ```

pub mod schema;

pub use schema::{CourseConfig, GlobalConfig, MarkdownConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::classify::wall_types;
use crate::core::types::{CollisionPolicy, LoType};
use crate::render::MarkdownOptions;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules: course config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Course configuration (if one was found)
    pub course: Option<CourseConfig>,
    global_path: Option<PathBuf>,
    course_path: Option<PathBuf>,
}

impl Config {
    /// Keys understood by [`Config::get`].
    pub const KEYS: [&'static str; 9] = [
        "course_id",
        "course_url",
        "walls",
        "route_collisions",
        "markdown.tables",
        "markdown.strikethrough",
        "markdown.footnotes",
        "markdown.tasklists",
        "loaded_from",
    ];

    /// Build a config from already parsed scopes.
    pub fn from_parts(global: GlobalConfig, course: Option<CourseConfig>) -> Self {
        Self {
            global,
            course,
            global_path: None,
            course_path: None,
        }
    }

    /// Load configuration from default locations.
    ///
    /// If `course_dir` is provided, also loads course config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(course_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), course_dir)
    }

    /// Load configuration from an explicit global file and course dir.
    pub fn load_from(
        global_path: Option<&Path>,
        course_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let global = match global_path {
            Some(path) => Self::read_config::<GlobalConfig>(path)?,
            None => GlobalConfig::default(),
        };

        let (course, course_path) = match course_dir {
            Some(dir) => Self::load_course(dir, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref c) = course {
            c.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                course,
                global_path: global_path.map(Path::to_path_buf),
                course_path,
            },
            warnings,
        })
    }

    /// Find the global config file, if any exists.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $TUTORWEAVE_CONFIG
        if let Ok(path) = std::env::var("TUTORWEAVE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/tutorweave/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("tutorweave/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.tutorweave/config.toml
        let path = Self::global_config_path().ok()?;
        path.exists().then_some(path)
    }

    /// Load course configuration from its standard locations.
    fn load_course(
        course_dir: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<CourseConfig>, Option<PathBuf>), ConfigError> {
        let canonical = Self::course_config_path(course_dir);
        if canonical.exists() {
            let config = Self::read_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        let compat = course_dir.join("tutorweave.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            let config = Self::read_config(&compat)?;
            return Ok((Some(config), Some(compat)));
        }

        Ok((None, None))
    }

    /// Read and parse a config file.
    fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.tutorweave/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".tutorweave/config.toml"))
    }

    /// Get the canonical path for course config.
    pub fn course_config_path(course_dir: &Path) -> PathBuf {
        course_dir.join(".tutorweave/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the course id, if configured.
    pub fn course_id(&self) -> Option<&str> {
        self.course.as_ref().and_then(|c| c.course_id.as_deref())
    }

    /// Get the course URL, if configured.
    pub fn course_url(&self) -> Option<&str> {
        self.course.as_ref().and_then(|c| c.course_url.as_deref())
    }

    /// Get the wall types to build.
    ///
    /// Defaults to every wall-eligible type.
    pub fn walls(&self) -> Vec<LoType> {
        self.course
            .as_ref()
            .and_then(|c| c.walls.as_ref())
            .map(|walls| walls.iter().map(|w| LoType::from(w.as_str())).collect())
            .unwrap_or_else(wall_types)
    }

    /// Get the route collision policy.
    ///
    /// Defaults to last-write-wins.
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.course
            .as_ref()
            .and_then(|c| c.route_collisions.as_deref())
            .or(self.global.route_collisions.as_deref())
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }

    /// Get markdown options, merged field by field.
    pub fn markdown(&self) -> MarkdownOptions {
        let global = self.global.markdown.as_ref();
        let course = self.course.as_ref().and_then(|c| c.markdown.as_ref());
        let pick = |field: fn(&MarkdownConfig) -> Option<bool>, default: bool| {
            course
                .and_then(field)
                .or_else(|| global.and_then(field))
                .unwrap_or(default)
        };

        let defaults = MarkdownOptions::default();
        MarkdownOptions {
            tables: pick(|m| m.tables, defaults.tables),
            strikethrough: pick(|m| m.strikethrough, defaults.strikethrough),
            footnotes: pick(|m| m.footnotes, defaults.footnotes),
            tasklists: pick(|m| m.tasklists, defaults.tasklists),
        }
    }

    /// Get an effective value by key, formatted for display.
    ///
    /// Returns `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        let markdown = self.markdown();
        let value = match key {
            "course_id" => self.course_id().unwrap_or("(not set)").to_string(),
            "course_url" => self.course_url().unwrap_or("(not set)").to_string(),
            "walls" => self
                .walls()
                .iter()
                .map(LoType::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "route_collisions" => self.collision_policy().to_string(),
            "markdown.tables" => markdown.tables.to_string(),
            "markdown.strikethrough" => markdown.strikethrough.to_string(),
            "markdown.footnotes" => markdown.footnotes.to_string(),
            "markdown.tasklists" => markdown.tasklists.to_string(),
            "loaded_from" => [self.global_path.as_deref(), self.course_path.as_deref()]
                .into_iter()
                .flatten()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            _ => return None,
        };
        Some(value)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded course config file.
    pub fn course_config_loaded_from(&self) -> Option<&Path> {
        self.course_path.as_deref()
    }
}
