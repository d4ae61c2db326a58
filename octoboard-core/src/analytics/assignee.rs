//! Assignee load charts: bar, line, and pie aggregators
//!
//! All functions here are pure over the canonical task collection plus the
//! field-key table, count Done tasks only, and return fresh chart
//! structures on every call.
//!
//! Unassigned handling differs on purpose between chart families: bar and
//! pie charts bucket assignee-less tasks under [`UNASSIGNED`], while the
//! per-bucket line chart drops them entirely.

use indexmap::IndexMap;

use crate::analytics::buckets::group_by_bucket;
use crate::types::{
    ChartData, Emphasis, FieldKeys, NamedPie, Series, Slice, Task, UNASSIGNED,
};

/// Which bucket axis the line chart runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucketing {
    /// The configured sprint field
    Sprint,
    /// `YYYY-MM` derived from the task's creation timestamp
    CreatedMonth,
}

/// Done-task counts per (assignee, size), one bar series per size.
///
/// With a single distinct size the chart stays unstacked with per-item
/// emphasis; from two sizes on it switches to a stacked layout with
/// whole-series emphasis. Purely presentational, but downstream snapshots
/// depend on the exact toggle.
pub fn assignee_size_bar(tasks: &[Task], keys: &FieldKeys) -> ChartData {
    let counts = size_counts(tasks, keys);

    let categories: Vec<String> = counts.keys().cloned().collect();
    let mut size_order: Vec<String> = Vec::new();
    for sizes in counts.values() {
        for size in sizes.keys() {
            if !size_order.contains(size) {
                size_order.push(size.clone());
            }
        }
    }

    let stacked = size_order.len() >= 2;
    let series = size_order
        .iter()
        .map(|size| Series {
            name: size.clone(),
            data: categories
                .iter()
                .map(|assignee| {
                    counts[assignee].get(size).copied().unwrap_or(0) as f64
                })
                .collect(),
            stack: stacked.then(|| "total".to_string()),
            emphasis: Some(if stacked {
                Emphasis::Series
            } else {
                Emphasis::SelfFocus
            }),
        })
        .collect();

    ChartData { categories, series }
}

/// Per-assignee effort over buckets, one line series per assignee.
///
/// Each Done task adds its effort weight (actual days, else estimate days,
/// else 1) to every one of its assignees in the task's bucket. Tasks with
/// no assignees contribute nothing here.
pub fn assignee_bucket_line(
    tasks: &[Task],
    keys: &FieldKeys,
    bucketing: Bucketing,
) -> ChartData {
    let grouping = match bucketing {
        Bucketing::Sprint => group_by_bucket(tasks, |t| t.field_str(&keys.sprint)),
        Bucketing::CreatedMonth => group_by_bucket(tasks, |t| t.created_month()),
    };

    let mut rows: IndexMap<String, Vec<f64>> = IndexMap::new();
    for (index, bucket) in grouping.buckets.iter().enumerate() {
        for task in &grouping.tasks_by_bucket[bucket] {
            if task.assignees.is_empty() {
                continue;
            }
            let weight = task.effort_weight(keys);
            for assignee in &task.assignees {
                let row = rows
                    .entry(assignee.clone())
                    .or_insert_with(|| vec![0.0; grouping.buckets.len()]);
                row[index] += weight;
            }
        }
    }

    ChartData {
        categories: grouping.buckets,
        series: rows
            .into_iter()
            .map(|(name, data)| Series::plain(name, data))
            .collect(),
    }
}

/// One pie per assignee, slicing that assignee's Done tasks across sizes.
pub fn assignee_size_pies(tasks: &[Task], keys: &FieldKeys) -> Vec<NamedPie> {
    pies_from(size_counts(tasks, keys))
}

/// One pie per size, slicing that size's Done tasks across assignees.
///
/// Transpose of [`assignee_size_pies`] over the same underlying counts.
pub fn size_assignee_pies(tasks: &[Task], keys: &FieldKeys) -> Vec<NamedPie> {
    let counts = size_counts(tasks, keys);

    let mut transposed: IndexMap<String, IndexMap<String, u64>> = IndexMap::new();
    for (assignee, sizes) in &counts {
        for (size, count) in sizes {
            *transposed
                .entry(size.clone())
                .or_default()
                .entry(assignee.clone())
                .or_insert(0) += count;
        }
    }

    pies_from(transposed)
}

/// Done-task counts keyed assignee -> size, in first-seen order.
///
/// Assignee-less tasks count once under [`UNASSIGNED`]; multi-assignee
/// tasks count once per assignee.
fn size_counts(tasks: &[Task], keys: &FieldKeys) -> IndexMap<String, IndexMap<String, u64>> {
    let mut counts: IndexMap<String, IndexMap<String, u64>> = IndexMap::new();

    for task in tasks.iter().filter(|t| t.is_done()) {
        let size = task.size_label(keys);
        if task.assignees.is_empty() {
            *counts
                .entry(UNASSIGNED.to_string())
                .or_default()
                .entry(size.clone())
                .or_insert(0) += 1;
        } else {
            for assignee in &task.assignees {
                *counts
                    .entry(assignee.clone())
                    .or_default()
                    .entry(size.clone())
                    .or_insert(0) += 1;
            }
        }
    }

    counts
}

fn pies_from(counts: IndexMap<String, IndexMap<String, u64>>) -> Vec<NamedPie> {
    counts
        .into_iter()
        .map(|(name, slices)| NamedPie {
            name,
            slices: slices
                .into_iter()
                .map(|(name, value)| Slice {
                    name,
                    value: value as f64,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NO_SIZE, NO_SPRINT, STATUS_DONE};
    use serde_json::json;

    fn done(assignees: &[&str], size: Option<&str>, sprint: Option<&str>) -> Task {
        let mut task = Task {
            status: STATUS_DONE.to_string(),
            assignees: assignees.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        if let Some(s) = size {
            task.fields.insert("Size".to_string(), json!(s));
        }
        if let Some(s) = sprint {
            task.fields.insert("Sprint".to_string(), json!(s));
        }
        task
    }

    #[test]
    fn test_bar_empty_input_yields_empty_chart() {
        let chart = assignee_size_bar(&[], &FieldKeys::default());
        assert!(chart.categories.is_empty());
        assert!(chart.series.is_empty());
    }

    #[test]
    fn test_bar_unassigned_category() {
        let keys = FieldKeys::default();
        let tasks = vec![done(&[], Some("M"), None)];
        let chart = assignee_size_bar(&tasks, &keys);

        assert_eq!(chart.categories, vec![UNASSIGNED]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "M");
        assert_eq!(chart.series[0].data, vec![1.0]);
    }

    #[test]
    fn test_bar_single_size_is_unstacked_self_emphasis() {
        let keys = FieldKeys::default();
        let tasks = vec![done(&["alice"], Some("M"), None), done(&["bob"], Some("M"), None)];
        let chart = assignee_size_bar(&tasks, &keys);

        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].stack, None);
        assert_eq!(chart.series[0].emphasis, Some(Emphasis::SelfFocus));
    }

    #[test]
    fn test_bar_two_sizes_stack_with_series_emphasis() {
        let keys = FieldKeys::default();
        let tasks = vec![
            done(&["alice"], Some("M"), None),
            done(&["alice"], Some("L"), None),
        ];
        let chart = assignee_size_bar(&tasks, &keys);

        assert_eq!(chart.series.len(), 2);
        for series in &chart.series {
            assert_eq!(series.stack.as_deref(), Some("total"));
            assert_eq!(series.emphasis, Some(Emphasis::Series));
        }
    }

    #[test]
    fn test_bar_missing_size_counts_under_no_size() {
        let keys = FieldKeys::default();
        let tasks = vec![done(&["alice"], None, None)];
        let chart = assignee_size_bar(&tasks, &keys);
        assert_eq!(chart.series[0].name, NO_SIZE);
    }

    #[test]
    fn test_line_skips_unassigned_entirely() {
        let keys = FieldKeys::default();
        let tasks = vec![
            done(&[], Some("M"), Some("Sprint-1")),
            done(&["alice"], Some("M"), Some("Sprint-1")),
        ];
        let chart = assignee_bucket_line(&tasks, &keys, Bucketing::Sprint);

        assert_eq!(chart.categories, vec!["Sprint-1"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "alice");
    }

    #[test]
    fn test_line_weight_fallback_chain() {
        let keys = FieldKeys::default();
        let mut with_actual = done(&["alice"], None, Some("Sprint-1"));
        with_actual.fields.insert("Actual".to_string(), json!(3));
        let mut with_estimate = done(&["alice"], None, Some("Sprint-1"));
        with_estimate.fields.insert("Estimate".to_string(), json!(2));
        let bare = done(&["alice"], None, Some("Sprint-1"));

        let chart = assignee_bucket_line(
            &[with_actual, with_estimate, bare],
            &keys,
            Bucketing::Sprint,
        );
        assert_eq!(chart.series[0].data, vec![6.0]);
    }

    #[test]
    fn test_line_by_created_month() {
        let keys = FieldKeys::default();
        let mut march = done(&["alice"], None, None);
        march.created_at = Some("2024-03-10T00:00:00Z".to_string());
        let mut january = done(&["alice"], None, None);
        january.created_at = Some("2024-01-02T00:00:00Z".to_string());
        let dateless = done(&["alice"], None, None);

        let chart =
            assignee_bucket_line(&[march, january, dateless], &keys, Bucketing::CreatedMonth);
        assert_eq!(chart.categories, vec!["2024-01", "2024-03", NO_SPRINT]);
        assert_eq!(chart.series[0].data, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_pies_transpose_same_counts() {
        let keys = FieldKeys::default();
        let tasks = vec![
            done(&["alice"], Some("M"), None),
            done(&["alice"], Some("L"), None),
            done(&["bob"], Some("M"), None),
        ];

        let by_assignee = assignee_size_pies(&tasks, &keys);
        assert_eq!(by_assignee.len(), 2);
        assert_eq!(by_assignee[0].name, "alice");
        assert_eq!(
            by_assignee[0].slices,
            vec![
                Slice { name: "M".to_string(), value: 1.0 },
                Slice { name: "L".to_string(), value: 1.0 },
            ]
        );

        let by_size = size_assignee_pies(&tasks, &keys);
        assert_eq!(by_size.len(), 2);
        assert_eq!(by_size[0].name, "M");
        assert_eq!(
            by_size[0].slices,
            vec![
                Slice { name: "alice".to_string(), value: 1.0 },
                Slice { name: "bob".to_string(), value: 1.0 },
            ]
        );
    }

    #[test]
    fn test_pies_ignore_undone_tasks() {
        let keys = FieldKeys::default();
        let mut open = done(&["alice"], Some("M"), None);
        open.status = "Todo".to_string();
        assert!(assignee_size_pies(&[open], &keys).is_empty());
    }
}
