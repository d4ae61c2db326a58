//! Core domain types for octoboard
//!
//! These types form the canonical data model every chart aggregator
//! consumes. Records arrive in two source shapes (REST issues, GraphQL
//! project items) and converge on [`Task`] via the `ingest` module.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Task** | Canonical issue/project-item record, source-agnostic |
//! | **Bucket** | A sprint name or `YYYY-MM` month key used for grouping |
//! | **Sentinel** | The reserved [`NO_SPRINT`] bucket for records with no bucket value |
//! | **Field keys** | Per-project names of the four custom project fields |
//! | **Insight** | A human-readable regression signal with negative severity |

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only status literal the aggregators treat specially.
pub const STATUS_DONE: &str = "Done";

/// Status assigned when a source record carries none.
pub const STATUS_TODO: &str = "Todo";

/// Reserved bucket label for tasks without a bucket value.
///
/// Always sorted last and excluded from numeric label comparison.
pub const NO_SPRINT: &str = "No Sprint";

/// Category for done tasks with no assignees (bar/pie charts only).
pub const UNASSIGNED: &str = "Unassigned";

/// Category for done tasks with no size value.
pub const NO_SIZE: &str = "No Size";

// ============================================
// Field indirection
// ============================================

/// Names of the four custom project fields, as configured for a project.
///
/// GitHub project field names vary per project, so aggregators never
/// hard-code them; every project-field access goes through this table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldKeys {
    /// Field holding the sprint/iteration label
    #[serde(default = "default_sprint_key")]
    pub sprint: String,
    /// Field holding the task size
    #[serde(default = "default_size_key")]
    pub size: String,
    /// Field holding estimated effort in days
    #[serde(default = "default_estimate_key")]
    pub estimate_days: String,
    /// Field holding actual effort in days
    #[serde(default = "default_actual_key")]
    pub actual_days: String,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            sprint: default_sprint_key(),
            size: default_size_key(),
            estimate_days: default_estimate_key(),
            actual_days: default_actual_key(),
        }
    }
}

fn default_sprint_key() -> String {
    "Sprint".to_string()
}

fn default_size_key() -> String {
    "Size".to_string()
}

fn default_estimate_key() -> String {
    "Estimate".to_string()
}

fn default_actual_key() -> String {
    "Actual".to_string()
}

// ============================================
// Canonical task
// ============================================

/// A source-agnostic issue or project-item record.
///
/// `status` and `assignees` are always present; absent source values
/// normalize to `None`/`[]`/[`STATUS_TODO`], never to a missing field.
/// Custom project fields live in `fields` and are read only through
/// [`FieldKeys`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Node ID of the source record
    pub id: Option<String>,
    /// Issue number
    pub number: Option<i64>,
    /// Free-form status; only the literal `"Done"` is special
    #[serde(rename = "Status")]
    pub status: String,
    /// Raw REST state, or a mirror of `status` for GraphQL records
    pub state: Option<String>,
    /// Repository name
    pub repository: Option<String>,
    /// Repository owner
    pub repo_owner: Option<String>,
    /// Assignee logins in source order; empty means unassigned
    pub assignees: Vec<String>,
    /// Label values. Two producers exist: REST yields plain name strings,
    /// GraphQL passes through whatever shape arrived (`{name}` nodes or
    /// strings). Count through [`label_name`], never directly.
    pub labels: Vec<Value>,
    /// ISO-8601 creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    /// Free-text body
    pub body: Option<String>,
    /// Web URL of the record
    pub html_url: Option<String>,
    /// Pass-through custom project fields, keyed by configured field name
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: None,
            number: None,
            status: STATUS_TODO.to_string(),
            state: None,
            repository: None,
            repo_owner: None,
            assignees: Vec::new(),
            labels: Vec::new(),
            created_at: None,
            body: None,
            html_url: None,
            fields: serde_json::Map::new(),
        }
    }
}

impl Task {
    /// Whether this task counts toward chart aggregation.
    pub fn is_done(&self) -> bool {
        self.status == STATUS_DONE
    }

    /// Raw custom-field value by configured name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String-coerced field value.
    ///
    /// Custom fields win; a handful of canonical scalars are addressable by
    /// name so distribution charts can select on them too.
    pub fn field_str(&self, name: &str) -> Option<String> {
        if let Some(value) = self.fields.get(name) {
            return coerce_string(value);
        }
        match name {
            "Status" => Some(self.status.clone()),
            "state" => self.state.clone(),
            "repository" => self.repository.clone(),
            "repo_owner" => self.repo_owner.clone(),
            "id" => self.id.clone(),
            _ => None,
        }
    }

    /// Number-coerced field value; `None` for missing or non-numeric.
    pub fn field_number(&self, name: &str) -> Option<f64> {
        coerce_number(self.fields.get(name)?)
    }

    /// Size label, with the shared missing-size fallback.
    pub fn size_label(&self, keys: &FieldKeys) -> String {
        self.field_str(&keys.size)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| NO_SIZE.to_string())
    }

    /// Per-task chart weight: actual days, else estimate days, else 1.
    ///
    /// Zero is treated as "no data", not as zero effort, so an explicit 0
    /// in either field still falls through.
    pub fn effort_weight(&self, keys: &FieldKeys) -> f64 {
        self.field_number(&keys.actual_days)
            .filter(|n| *n != 0.0)
            .or_else(|| self.field_number(&keys.estimate_days).filter(|n| *n != 0.0))
            .unwrap_or(1.0)
    }

    /// `YYYY-MM` month key from `created_at`, if it parses as ISO-8601.
    pub fn created_month(&self) -> Option<String> {
        month_key(self.created_at.as_deref()?)
    }
}

/// Normalize either label shape (plain string or `{name}` node) to a name.
pub fn label_name(label: &Value) -> Option<&str> {
    label
        .as_str()
        .or_else(|| label.get("name").and_then(Value::as_str))
}

/// String coercion for field values: strings verbatim, numbers and bools
/// via display; structured values don't coerce.
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Number coercion for field values; numeric strings parse, everything
/// non-finite is `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// `YYYY-MM` key for an ISO-8601 timestamp.
pub fn month_key(timestamp: &str) -> Option<String> {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.format("%Y-%m").to_string())
}

// ============================================
// Pull requests
// ============================================

/// A pull request, reduced to what review-activity charts need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR author login
    pub author: String,
    /// ISO-8601 creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Review comments; absent in the source normalizes to empty
    #[serde(rename = "reviewComments", default)]
    pub review_comments: Vec<ReviewComment>,
}

/// A single review comment on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Comment author login
    pub author: String,
    /// ISO-8601 creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    /// Comment body
    pub body: Option<String>,
    /// File path the comment is attached to
    pub path: Option<String>,
    /// Diff position of the comment
    pub position: Option<i64>,
}

impl ReviewComment {
    /// A comment by the PR's own author never counts in either direction.
    pub fn is_self_comment(&self, pr: &PullRequest) -> bool {
        self.author == pr.author
    }
}

// ============================================
// Chart output
// ============================================

/// Per-series highlight behavior, serialized the way chart options spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    /// Highlight only the hovered item
    #[serde(rename = "self")]
    SelfFocus,
    /// Highlight the whole series
    #[serde(rename = "series")]
    Series,
}

/// One chart series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    /// Display name (assignee, size, reviewer, ...)
    pub name: String,
    /// One value per category, aligned with `ChartData::categories`
    pub data: Vec<f64>,
    /// Stack group name; absent for unstacked layouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Emphasis mode; only bar charts set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
}

impl Series {
    /// A plain line/data series with no presentation toggles.
    pub fn plain(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data,
            stack: None,
            emphasis: None,
        }
    }
}

/// Category/series data for bar and line charts.
///
/// Plain and serializable; the rendering layer owns everything visual.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub name: String,
    pub value: f64,
}

/// A named pie chart (one of a per-assignee or per-size group).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedPie {
    pub name: String,
    pub slices: Vec<Slice>,
}

// ============================================
// Insights
// ============================================

/// A velocity regression signal.
///
/// Severity is always in `[-5, -1]`; this design emits nothing for
/// increases or ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub severity: i32,
}
