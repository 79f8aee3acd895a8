//! core
//!
//! Core domain types for course trees.
//!
//! # Modules
//!
//! - [`types`] - Strong types: LoType, Route, NodeId, FrontMatter, etc.
//! - [`lo`] - Raw and decorated learning objects
//! - [`course`] - The course arena and its computed collections
//! - [`classify`] - Type categories and the order resolver
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The course owns every node; references between nodes are [`types::NodeId`]s
//! - Type tags form a closed vocabulary with an explicit unknown case
//! - Schemas are strict and self-describing

pub mod classify;
pub mod config;
pub mod course;
pub mod lo;
pub mod types;
