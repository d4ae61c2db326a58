//! Integration tests for the octoboard analytics pipeline
//!
//! These tests use fixture files in `tests/fixtures/` to verify the
//! end-to-end flow: raw source records → canonical tasks → chart
//! aggregations, insights, and RCA mining.

use octoboard_core::analytics::{
    assignee_bucket_line, assignee_size_bar, field_distribution, velocity_insights, Bucketing,
    LABELS_FIELD,
};
use octoboard_core::miner::{extract_rca, extract_sentences, process_sentences};
use octoboard_core::types::{NO_SIZE, NO_SPRINT, UNASSIGNED};
use octoboard_core::{ingest, FieldKeys, Task};
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(fixture_path(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// All fixture records, REST and GraphQL, as canonical tasks.
fn all_tasks() -> Vec<Task> {
    let mut tasks: Vec<Task> = load_fixture("rest-issues.json")
        .iter()
        .map(ingest::from_rest)
        .collect();
    tasks.extend(load_fixture("graphql-items.json").iter().map(ingest::from_graphql));
    tasks
}

// ============================================
// Normalization
// ============================================

#[test]
fn test_both_sources_converge_on_canonical_tasks() {
    let tasks = all_tasks();
    assert_eq!(tasks.len(), 8);

    // REST: closed issue becomes Done, repo URL splits into name and owner
    let rest = &tasks[0];
    assert_eq!(rest.status, "Done");
    assert_eq!(rest.repository.as_deref(), Some("billing"));
    assert_eq!(rest.repo_owner.as_deref(), Some("acme"));
    assert!(rest.fields.is_empty());

    // GraphQL: custom fields pass through for keyed access
    let keys = FieldKeys::default();
    let graphql = &tasks[3];
    assert_eq!(graphql.status, "Done");
    assert_eq!(graphql.field_str(&keys.sprint).as_deref(), Some("Sprint-9"));
    assert_eq!(graphql.field_number(&keys.actual_days), Some(4.0));
}

// ============================================
// Chart aggregation
// ============================================

#[test]
fn test_bar_chart_over_mixed_sources() {
    let tasks = all_tasks();
    let chart = assignee_size_bar(&tasks, &FieldKeys::default());

    assert_eq!(chart.categories, vec!["alice", UNASSIGNED, "bob"]);

    let series_names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(series_names, vec![NO_SIZE, "M", "L", "S"]);

    // four distinct sizes: stacked layout
    assert!(chart.series.iter().all(|s| s.stack.as_deref() == Some("total")));

    let alice = &chart.series[1].data; // "M" series
    assert_eq!(alice, &vec![1.0, 0.0, 1.0]);
}

#[test]
fn test_line_chart_by_sprint_weights_and_sentinel() {
    let tasks = all_tasks();
    let chart = assignee_bucket_line(&tasks, &FieldKeys::default(), Bucketing::Sprint);

    assert_eq!(chart.categories, vec!["Sprint-9", "Sprint-10", NO_SPRINT]);

    let alice = chart.series.iter().find(|s| s.name == "alice").unwrap();
    // actual 4 + actual 6 in Sprint-9; weight 1 fallback under the sentinel
    assert_eq!(alice.data, vec![10.0, 0.0, 1.0]);

    let bob = chart.series.iter().find(|s| s.name == "bob").unwrap();
    // zero actual days is "no data": the 2-day estimate wins in Sprint-10
    assert_eq!(bob.data, vec![6.0, 2.0, 0.0]);

    // unassigned tasks never produce a series
    assert_eq!(chart.series.len(), 2);
}

#[test]
fn test_line_chart_by_created_month() {
    let tasks = all_tasks();
    let chart = assignee_bucket_line(&tasks, &FieldKeys::default(), Bucketing::CreatedMonth);

    assert_eq!(chart.categories, vec!["2024-01", "2024-02"]);

    let alice = chart.series.iter().find(|s| s.name == "alice").unwrap();
    assert_eq!(alice.data, vec![10.0, 1.0]);
}

#[test]
fn test_label_distribution_counts_done_only() {
    let tasks = all_tasks();
    let selected = vec!["bug".to_string(), "infra".to_string(), "docs".to_string()];
    let chart = field_distribution(&tasks, LABELS_FIELD, &selected);

    assert_eq!(chart.categories, selected);
    // "docs" only appears on an open issue
    assert_eq!(chart.series[0].data, vec![5.0, 1.0, 0.0]);
}

// ============================================
// Velocity insights
// ============================================

#[test]
fn test_velocity_regression_end_to_end() {
    let tasks = all_tasks();
    let keys = FieldKeys::default();
    let insights = velocity_insights(&tasks, &keys, &keys.actual_days);

    assert_eq!(insights.len(), 2);

    // Sprint-10 completed 1 task against Sprint-9's 2
    assert!(insights[0].text.contains("50.0%"));
    assert!(insights[0].text.contains("1 vs 2 tasks"));
    assert_eq!(insights[0].severity, -2);

    // actual days collapsed 10 -> 0
    assert!(insights[1].text.contains("100.0%"));
    assert_eq!(insights[1].severity, -5);
}

// ============================================
// Text mining
// ============================================

#[test]
fn test_rca_mining_from_fixture_bodies() {
    let tasks = all_tasks();

    let rca = extract_rca(tasks[0].body.as_deref().unwrap()).unwrap();
    assert!(rca.starts_with("The retry queue"));
    assert!(!rca.contains("Fix"));

    let sentences = extract_sentences(&rca);
    assert_eq!(sentences.len(), 2);
    assert!(sentences.iter().all(|s| s.contains("retry queue")));

    // "RCA:" inline form
    let inline = extract_rca(tasks[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(inline, "the cron ran twice during the DST changeover window");

    // a body without an RCA section mines nothing
    assert_eq!(extract_rca(tasks[2].body.as_deref().unwrap()), None);
}

#[tokio::test]
async fn test_sentence_processing_offline_path() {
    let sentences = extract_sentences("The retry queue replayed jobs. The retry queue replayed jobs.");
    let batch = process_sentences(sentences.clone(), None).await;
    assert_eq!(batch.normalized, sentences);
    assert!(batch.filtered.is_empty());
}
