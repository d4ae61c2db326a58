//! Bucket labels: natural sort and the shared grouping primitive
//!
//! Sprint labels sort by the first run of digits they contain, so
//! "Sprint-2" comes before "Sprint-10" where plain lexicographic order
//! would invert them. The reserved [`NO_SPRINT`] sentinel never enters the
//! comparison; callers filter it out, sort, then append it.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::types::{Task, NO_SPRINT};

/// Sort bucket labels in place, numerically where possible.
///
/// Labels with equal leading numbers fall back to lexicographic order,
/// which keeps `YYYY-MM` month keys chronological within a year.
pub fn sort_sprints_numerically(labels: &mut [String]) {
    labels.sort_by(|a, b| compare_labels(a, b));
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// First run of ASCII digits in a label, e.g. "Sprint-10" -> 10.
fn leading_number(label: &str) -> Option<u64> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Trim and collapse whitespace runs so "Sprint  1" and "Sprint 1" merge.
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Done tasks grouped under sorted bucket labels.
///
/// `buckets` carries the sorted labels with the sentinel appended last when
/// present; `tasks_by_bucket` holds the same keys in first-seen order.
#[derive(Debug)]
pub struct BucketGrouping<'a> {
    pub buckets: Vec<String>,
    pub tasks_by_bucket: IndexMap<String, Vec<&'a Task>>,
}

impl BucketGrouping<'_> {
    /// Bucket labels without the sentinel, in sorted order.
    pub fn named_buckets(&self) -> Vec<&String> {
        self.buckets.iter().filter(|b| *b != NO_SPRINT).collect()
    }
}

/// Group Done tasks by the bucket the selector yields.
///
/// Tasks without a bucket value land under the [`NO_SPRINT`] sentinel.
/// Labels are whitespace-normalized before grouping.
pub fn group_by_bucket<'a, F>(tasks: &'a [Task], selector: F) -> BucketGrouping<'a>
where
    F: Fn(&Task) -> Option<String>,
{
    let mut tasks_by_bucket: IndexMap<String, Vec<&Task>> = IndexMap::new();

    for task in tasks.iter().filter(|t| t.is_done()) {
        let bucket = selector(task)
            .map(|label| normalize_label(&label))
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| NO_SPRINT.to_string());
        tasks_by_bucket.entry(bucket).or_default().push(task);
    }

    let mut buckets: Vec<String> = tasks_by_bucket
        .keys()
        .filter(|b| *b != NO_SPRINT)
        .cloned()
        .collect();
    sort_sprints_numerically(&mut buckets);
    if tasks_by_bucket.contains_key(NO_SPRINT) {
        buckets.push(NO_SPRINT.to_string());
    }

    BucketGrouping {
        buckets,
        tasks_by_bucket,
    }
}
