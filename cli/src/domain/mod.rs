//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod command;
pub mod config;
pub mod error;
pub mod node;
pub mod rollout;

pub use command::{NodeCommand, import_command, tag_command};
pub use config::{Engine, KindpushConfig, resolve_cluster_name, resolve_engine};
pub use error::{AggregateError, ConfigError, NodeFailure, PublishError};
pub use node::{NodeEntry, parse_node_listing};
pub use rollout::{ArchiveSummary, Rollout};
