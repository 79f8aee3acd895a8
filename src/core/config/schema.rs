//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$TUTORWEAVE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/tutorweave/config.toml`
//! 3. `~/.tutorweave/config.toml` (canonical write location)
//!
//! # Course Config
//!
//! Located at `<course dir>/.tutorweave/config.toml` (canonical).
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., wall types must be
//! wall-eligible learning object types).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::classify::is_wall_type;
use crate::core::types::{CollisionPolicy, LoType};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// route_collisions = "reject"
///
/// [markdown]
/// tables = true
/// footnotes = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// What to do when two learning objects share a route
    pub route_collisions: Option<String>,

    /// Markdown rendering defaults
    pub markdown: Option<MarkdownConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_collisions(self.route_collisions.as_deref())
    }
}

/// Course configuration.
///
/// # Example
///
/// ```toml
/// course_id = "web-dev"
/// course_url = "web-dev.netlify.app"
/// walls = ["talk", "lab"]
///
/// [markdown]
/// tables = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CourseConfig {
    /// Course id injected into routes
    pub course_id: Option<String>,

    /// Course URL injected into asset links
    pub course_url: Option<String>,

    /// Wall types to build (default: all wall-eligible types)
    pub walls: Option<Vec<String>>,

    /// Overrides the global collision policy
    pub route_collisions: Option<String>,

    /// Overrides global markdown settings field by field
    pub markdown: Option<MarkdownConfig>,
}

impl CourseConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_collisions(self.route_collisions.as_deref())?;

        if let Some(course_id) = &self.course_id {
            if course_id.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "course_id cannot be empty".to_string(),
                ));
            }
        }

        if let Some(walls) = &self.walls {
            for wall in walls {
                let lo_type = LoType::from(wall.as_str());
                if !is_wall_type(&lo_type) {
                    return Err(ConfigError::InvalidValue(format!(
                        "'{}' cannot have a wall, must be one of: talk, note, lab, web, archive, github",
                        wall
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Markdown extension switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub tables: Option<bool>,
    pub strikethrough: Option<bool>,
    pub footnotes: Option<bool>,
    pub tasklists: Option<bool>,
}

fn validate_collisions(value: Option<&str>) -> Result<(), ConfigError> {
    if let Some(policy) = value {
        policy.parse::<CollisionPolicy>().map_err(|_| {
            ConfigError::InvalidValue(format!(
                "invalid route_collisions '{}', must be one of: {}",
                policy,
                CollisionPolicy::NAMES.join(", ")
            ))
        })?;
    }
    Ok(())
}
