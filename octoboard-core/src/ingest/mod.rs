//! Source record normalization
//!
//! Issues arrive in two shapes: REST API payloads and GraphQL ProjectV2
//! items that an upstream fetcher already partially flattened. Both converge
//! on the canonical [`Task`] here, so the aggregators never sniff shapes.
//!
//! Both entry points are total: absent or malformed fields degrade to
//! `None`/`[]`/defaults, never to an error. Only handing in something other
//! than a JSON object is a caller bug, and even that yields a default task.

use serde_json::Value;

use crate::types::{Task, STATUS_DONE, STATUS_TODO};

/// Normalize a REST issue payload.
///
/// REST issues carry no custom project fields, so the `fields` map stays
/// empty and every project-key lookup on the result degrades to its
/// fallback.
pub fn from_rest(raw: &Value) -> Task {
    let state = raw
        .get("state")
        .and_then(Value::as_str)
        .map(str::to_string);
    let status = if state.as_deref() == Some("closed") {
        STATUS_DONE
    } else {
        STATUS_TODO
    };

    let (repository, repo_owner) =
        split_repository_url(raw.get("repository_url").and_then(Value::as_str));

    Task {
        id: raw.get("node_id").and_then(Value::as_str).map(str::to_string),
        number: raw.get("number").and_then(Value::as_i64),
        status: status.to_string(),
        state,
        repository,
        repo_owner,
        assignees: logins(raw.get("assignees")),
        labels: rest_label_names(raw.get("labels")),
        created_at: raw
            .get("created_at")
            .and_then(Value::as_str)
            .map(str::to_string),
        body: raw.get("body").and_then(Value::as_str).map(str::to_string),
        html_url: raw
            .get("html_url")
            .and_then(Value::as_str)
            .map(str::to_string),
        fields: serde_json::Map::new(),
    }
}

/// Normalize a partially-flattened GraphQL project item.
///
/// The canonical task is a superset of the source record: every key the
/// normalizer does not recognize is forwarded unmodified into `fields`,
/// which is where the configured project fields (sprint, size, effort)
/// end up. `state` mirrors the resolved status for legacy consumers.
pub fn from_graphql(raw: &Value) -> Task {
    let Some(object) = raw.as_object() else {
        return Task::default();
    };

    let status = object
        .get("Status")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(STATUS_TODO)
        .to_string();

    let mut task = Task {
        status: status.clone(),
        state: Some(status),
        ..Default::default()
    };

    for (key, value) in object {
        match key.as_str() {
            "Status" => {}
            "id" => task.id = value.as_str().map(str::to_string),
            "number" | "issue_number" => task.number = value.as_i64(),
            "repository" => task.repository = value.as_str().map(str::to_string),
            "repo_owner" => task.repo_owner = value.as_str().map(str::to_string),
            "assignees" => task.assignees = logins(Some(value)),
            // Passed through as-is; the label shape is normalized at count
            // time, not here.
            "labels" => task.labels = value.as_array().cloned().unwrap_or_default(),
            "createdAt" | "created_at" => {
                task.created_at = value.as_str().map(str::to_string)
            }
            "body" => task.body = value.as_str().map(str::to_string),
            "html_url" | "url" => task.html_url = value.as_str().map(str::to_string),
            _ => {
                task.fields.insert(key.clone(), value.clone());
            }
        }
    }

    task
}

/// Repository name and owner from a REST `repository_url`.
///
/// `repository` is taken from the URL tail and stays best-effort even when
/// the URL is short; `repo_owner` is positional (segment 4 of
/// `https://api.github.com/repos/{owner}/{repo}`) and degrades to `None`.
/// The asymmetry between the two is deliberate.
fn split_repository_url(url: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(url) = url else {
        return (None, None);
    };
    let segments: Vec<&str> = url.split('/').collect();
    let repository = segments.last().map(|s| s.to_string());
    let repo_owner = segments.get(4).map(|s| s.to_string());
    (repository, repo_owner)
}

/// Collect assignee logins from either producer's shape: `{login}` objects
/// (REST) or plain strings (flattened GraphQL).
fn logins(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .as_str()
                        .or_else(|| entry.get("login").and_then(Value::as_str))
                })
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// REST labels are `{name}` nodes; reduce them to plain name strings.
fn rest_label_names(value: Option<&Value>) -> Vec<Value> {
    value
        .and_then(Value::as_array)
        .map(|labels| {
            labels
                .iter()
                .filter_map(|label| {
                    label
                        .get("name")
                        .and_then(Value::as_str)
                        .or_else(|| label.as_str())
                })
                .map(|name| Value::String(name.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
