//! # octoboard-core
//!
//! Analytics core for octoboard - a dashboard that charts GitHub issues
//! and pull requests.
//!
//! This library provides:
//! - Normalization of REST issues and GraphQL project items into one
//!   canonical task shape
//! - Bucket sorting/grouping with natural sprint ordering
//! - Chart-ready aggregations (assignee load, review activity, label
//!   distributions)
//! - Velocity regression insights
//! - RCA text mining with optional sentence deduplication
//!
//! ## Architecture
//!
//! Data flows through three stages:
//! - **Ingest:** Raw source records (`serde_json::Value`) normalize into
//!   [`Task`] values; fetching, pagination, and caching live upstream
//! - **Aggregate:** Pure functions turn the task/PR collections into plain
//!   category/series structures for any charting library
//! - **Mine:** Issue bodies yield RCA sentences, optionally merged through
//!   a text-completion endpoint with a local fallback
//!
//! Everything is recomputed from scratch per call; the crate holds no
//! state and renders nothing.
//!
//! ## Example
//!
//! ```rust
//! use octoboard_core::{analytics, ingest, FieldKeys};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "Status": "Done",
//!     "assignees": ["alice"],
//!     "Sprint": "Sprint-4",
//!     "Size": "M"
//! });
//! let tasks = vec![ingest::from_graphql(&raw)];
//!
//! let keys = FieldKeys::default();
//! let chart = analytics::assignee_size_bar(&tasks, &keys);
//! assert_eq!(chart.categories, vec!["alice"]);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::{
    ChartData, Emphasis, FieldKeys, Insight, NamedPie, PullRequest, ReviewComment, Series, Slice,
    Task,
};

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod miner;
pub mod types;
