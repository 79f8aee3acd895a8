//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`LoType`] - Closed vocabulary of learning object types
//! - [`Route`] - Path-like key identifying a learning object in the index
//! - [`NodeId`] - Index of a learning object in the course arena
//! - [`CollisionPolicy`] - Index behavior on duplicate routes
//! - [`IconType`] - Icon descriptor taken from front matter
//! - [`FrontMatter`] - Author supplied attributes of a learning object
//! - [`Properties`] - Course level properties
//! - [`Fingerprint`] - Decorated course hash for idempotence checks
//!
//! # Examples
//!
//! ```
//! use tutorweave::core::types::{LoType, Route};
//!
//! assert_eq!(LoType::from("panelnote"), LoType::PanelNote);
//! assert_eq!(LoType::from("hologram"), LoType::Unknown("hologram".into()));
//!
//! let route = Route::new("/topic/course/topic-01");
//! assert_eq!(route.as_str(), "/topic/course/topic-01");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid learning object type: {0}")]
    InvalidLoType(String),

    #[error("invalid collision policy: {0}")]
    InvalidCollisionPolicy(String),
}

/// The type tag of a learning object.
///
/// Tags outside the known vocabulary deserialize to [`LoType::Unknown`]
/// rather than failing, so a course with an unfamiliar type still decorates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoType {
    Course,
    Topic,
    Unit,
    Side,
    Lab,
    Step,
    Talk,
    Note,
    Video,
    PanelVideo,
    PanelTalk,
    PanelNote,
    Web,
    Github,
    Archive,
    Unknown(String),
}

impl LoType {
    /// Every known tag, in declaration order.
    pub const KNOWN: [&'static str; 15] = [
        "course",
        "topic",
        "unit",
        "side",
        "lab",
        "step",
        "talk",
        "note",
        "video",
        "panelvideo",
        "paneltalk",
        "panelnote",
        "web",
        "github",
        "archive",
    ];

    /// Parse a tag, rejecting anything outside the known vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLoType` for unknown tags.
    pub fn parse_known(tag: &str) -> Result<Self, TypeError> {
        match Self::from(tag) {
            LoType::Unknown(tag) => Err(TypeError::InvalidLoType(tag)),
            known => Ok(known),
        }
    }

    /// Get the tag as it appears in course JSON.
    pub fn as_str(&self) -> &str {
        match self {
            LoType::Course => "course",
            LoType::Topic => "topic",
            LoType::Unit => "unit",
            LoType::Side => "side",
            LoType::Lab => "lab",
            LoType::Step => "step",
            LoType::Talk => "talk",
            LoType::Note => "note",
            LoType::Video => "video",
            LoType::PanelVideo => "panelvideo",
            LoType::PanelTalk => "paneltalk",
            LoType::PanelNote => "panelnote",
            LoType::Web => "web",
            LoType::Github => "github",
            LoType::Archive => "archive",
            LoType::Unknown(tag) => tag,
        }
    }

    /// Check whether the tag is part of the known vocabulary.
    pub fn is_known(&self) -> bool {
        !matches!(self, LoType::Unknown(_))
    }
}

impl From<&str> for LoType {
    fn from(tag: &str) -> Self {
        match tag {
            "course" => LoType::Course,
            "topic" => LoType::Topic,
            "unit" => LoType::Unit,
            "side" => LoType::Side,
            "lab" => LoType::Lab,
            "step" => LoType::Step,
            "talk" => LoType::Talk,
            "note" => LoType::Note,
            "video" => LoType::Video,
            "panelvideo" => LoType::PanelVideo,
            "paneltalk" => LoType::PanelTalk,
            "panelnote" => LoType::PanelNote,
            "web" => LoType::Web,
            "github" => LoType::Github,
            "archive" => LoType::Archive,
            other => LoType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for LoType {
    fn from(tag: String) -> Self {
        LoType::from(tag.as_str())
    }
}

impl From<LoType> for String {
    fn from(lo_type: LoType) -> Self {
        match lo_type {
            LoType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for LoType {
    fn default() -> Self {
        LoType::Unknown(String::new())
    }
}

impl std::fmt::Display for LoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A path-like key identifying a learning object.
///
/// Routes are the keys of the course index. They are not validated: content
/// generators produce them and the indexer decides what to do on collisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    /// Create a route from any string.
    pub fn new(route: impl Into<String>) -> Self {
        Self(route.into())
    }

    /// Get the route as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the route is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace every occurrence of `from` with `to`.
    pub fn replace(&mut self, from: &str, to: &str) {
        if self.0.contains(from) {
            self.0 = self.0.replace(from, to);
        }
    }
}

impl From<&str> for Route {
    fn from(route: &str) -> Self {
        Self::new(route)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a learning object inside a course arena.
///
/// Ids are only handed out by the arena that owns the node, so they are
/// non-owning back references that never form ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Get the raw arena position.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the indexer does when two nodes share a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollisionPolicy {
    /// The node visited later replaces the earlier one. Every overwrite is
    /// reported.
    #[default]
    LastWriteWins,
    /// The pass fails on the first duplicate route.
    Reject,
}

impl CollisionPolicy {
    /// Accepted spellings, as written in config.
    pub const NAMES: [&'static str; 2] = ["last-write-wins", "reject"];

    /// Get the config spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            CollisionPolicy::LastWriteWins => "last-write-wins",
            CollisionPolicy::Reject => "reject",
        }
    }
}

impl std::str::FromStr for CollisionPolicy {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-write-wins" => Ok(CollisionPolicy::LastWriteWins),
            "reject" => Ok(CollisionPolicy::Reject),
            other => Err(TypeError::InvalidCollisionPolicy(other.to_string())),
        }
    }
}

impl TryFrom<String> for CollisionPolicy {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CollisionPolicy> for String {
    fn from(policy: CollisionPolicy) -> Self {
        policy.as_str().to_string()
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An icon descriptor (`icon: {type, color}` in front matter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconType {
    #[serde(rename = "type")]
    pub icon_type: String,
    #[serde(default)]
    pub color: String,
}

/// Author supplied attributes of a learning object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter(BTreeMap<String, Value>);

impl FrontMatter {
    /// Create front matter from a map of values.
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Self(values)
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Check whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The explicit ordering hint, if one is present.
    ///
    /// Accepts a JSON number or a string holding a number. Anything else,
    /// including zero and non-finite values, counts as "no hint".
    ///
    /// ```
    /// use serde_json::json;
    /// use tutorweave::core::types::FrontMatter;
    ///
    /// let fm: FrontMatter = serde_json::from_value(json!({"order": "3"})).unwrap();
    /// assert_eq!(fm.order(), Some(3.0));
    ///
    /// let fm: FrontMatter = serde_json::from_value(json!({"order": true})).unwrap();
    /// assert_eq!(fm.order(), None);
    ///
    /// let fm: FrontMatter = serde_json::from_value(json!({"order": 0})).unwrap();
    /// assert_eq!(fm.order(), None);
    /// ```
    pub fn order(&self) -> Option<f64> {
        let order = match self.0.get("order")? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (order.is_finite() && order != 0.0).then_some(order)
    }

    /// The icon descriptor, if `icon` is an object carrying a `type`.
    pub fn icon(&self) -> Option<IconType> {
        let icon = self.0.get("icon")?.as_object()?;
        let icon_type = icon.get("type")?.as_str()?;
        let color = icon.get("color").and_then(Value::as_str).unwrap_or_default();
        Some(IconType {
            icon_type: icon_type.to_string(),
            color: color.to_string(),
        })
    }
}

/// Course level properties (`properties.yaml` of the course source).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Value>);

impl Properties {
    /// Create properties from a map of values.
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Self(values)
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Get a scalar property as a string.
    ///
    /// Booleans and numbers are stringified since YAML authors write
    /// `portfolio: true` as often as `portfolio: "true"`. Empty strings,
    /// nulls, arrays and objects yield `None`.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A hash over the decorated state of a course.
///
/// Two passes over the same raw tree must produce the same fingerprint.
///
/// # Example
///
/// ```
/// use tutorweave::core::types::Fingerprint;
///
/// let entries = vec![("/a", "topic"), ("/b", "lab")];
/// let fp = Fingerprint::compute(&entries);
///
/// // Input order does not matter
/// let reversed = vec![("/b", "lab"), ("/a", "topic")];
/// assert_eq!(fp, Fingerprint::compute(&reversed));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint from a set of (key, payload) pairs.
    ///
    /// Entries are sorted by key, then payload, before hashing.
    pub fn compute<K: AsRef<str>, V: AsRef<str>>(entries: &[(K, V)]) -> Self {
        let mut sorted: Vec<(&str, &str)> = entries
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect();
        sorted.sort_unstable();

        let mut hasher = Sha256::new();
        for (key, payload) in sorted {
            hasher.update(key.as_bytes());
            hasher.update(b"\0");
            hasher.update(payload.as_bytes());
            hasher.update(b"\n");
        }

        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get an abbreviated form for display.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
