//! Analytics module for octoboard
//!
//! Chart-ready aggregation over the canonical task and pull-request
//! collections:
//! - Bucket sorting and the Done-only grouping primitive
//! - Assignee load charts (bar, line, pie)
//! - Review-comment activity charts
//! - Label/field distribution charts
//! - Velocity regression insights
//!
//! Every function here is pure and synchronous: same inputs, same fresh
//! output structures, no shared state between calls. The whole collection
//! is recomputed on each invocation; nothing streams or caches.

pub mod activity;
pub mod assignee;
pub mod buckets;
pub mod distribution;
pub mod velocity;

pub use activity::{
    comments_given_pie, comments_received_pie, review_activity_line, ReviewActivity,
};
pub use assignee::{
    assignee_bucket_line, assignee_size_bar, assignee_size_pies, size_assignee_pies, Bucketing,
};
pub use buckets::{group_by_bucket, normalize_label, sort_sprints_numerically, BucketGrouping};
pub use distribution::{field_distribution, LABELS_FIELD};
pub use velocity::velocity_insights;
