//! Review-comment activity charts
//!
//! Counts flow from (PR, comment) pairs: a comment counts toward the PR
//! author's "received" tally and the comment author's "given" tally, and a
//! comment by the PR's own author counts toward neither. PRs without review
//! comments contribute nothing at all, not even an empty month bucket.

use indexmap::IndexMap;

use crate::analytics::buckets::sort_sprints_numerically;
use crate::types::{month_key, PullRequest, Series, Slice, NO_SPRINT};

/// Received and given review-comment series over one shared month axis.
#[derive(Debug, Clone, Default)]
pub struct ReviewActivity {
    /// Sorted `YYYY-MM` buckets (sentinel last when a PR date fails to parse)
    pub categories: Vec<String>,
    /// One series per PR author: comments received per month
    pub received: Vec<Series>,
    /// One series per commenter: comments given per month
    pub given: Vec<Series>,
}

/// Monthly review activity, bucketed by each PR's creation month.
pub fn review_activity_line(prs: &[PullRequest]) -> ReviewActivity {
    let commented: Vec<&PullRequest> = prs
        .iter()
        .filter(|pr| !pr.review_comments.is_empty())
        .collect();
    if commented.is_empty() {
        return ReviewActivity::default();
    }

    let mut months: Vec<String> = Vec::new();
    for pr in &commented {
        let month = pr_month(pr);
        if !months.contains(&month) {
            months.push(month);
        }
    }
    let mut categories: Vec<String> =
        months.iter().filter(|m| *m != NO_SPRINT).cloned().collect();
    sort_sprints_numerically(&mut categories);
    if months.iter().any(|m| m == NO_SPRINT) {
        categories.push(NO_SPRINT.to_string());
    }

    let mut received: IndexMap<String, Vec<f64>> = IndexMap::new();
    let mut given: IndexMap<String, Vec<f64>> = IndexMap::new();

    for pr in &commented {
        let month = pr_month(pr);
        let index = categories
            .iter()
            .position(|m| *m == month)
            .unwrap_or(categories.len() - 1);
        for comment in pr.review_comments.iter().filter(|c| !c.is_self_comment(pr)) {
            received
                .entry(pr.author.clone())
                .or_insert_with(|| vec![0.0; categories.len()])[index] += 1.0;
            given
                .entry(comment.author.clone())
                .or_insert_with(|| vec![0.0; categories.len()])[index] += 1.0;
        }
    }

    ReviewActivity {
        categories,
        received: into_series(received),
        given: into_series(given),
    }
}

/// Review comments received per PR author, self-comments excluded.
pub fn comments_received_pie(prs: &[PullRequest]) -> Vec<Slice> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for (pr, _comment) in eligible_pairs(prs) {
        *counts.entry(pr.author.clone()).or_insert(0) += 1;
    }
    into_slices(counts)
}

/// Review comments given per commenter, self-comments excluded.
pub fn comments_given_pie(prs: &[PullRequest]) -> Vec<Slice> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for (_pr, comment) in eligible_pairs(prs) {
        *counts.entry(comment.author.clone()).or_insert(0) += 1;
    }
    into_slices(counts)
}

/// All (PR, comment) pairs that count, i.e. non-self comments.
fn eligible_pairs(
    prs: &[PullRequest],
) -> impl Iterator<Item = (&PullRequest, &crate::types::ReviewComment)> {
    prs.iter().flat_map(|pr| {
        pr.review_comments
            .iter()
            .filter(move |comment| !comment.is_self_comment(pr))
            .map(move |comment| (pr, comment))
    })
}

fn pr_month(pr: &PullRequest) -> String {
    month_key(&pr.created_at).unwrap_or_else(|| NO_SPRINT.to_string())
}

fn into_series(rows: IndexMap<String, Vec<f64>>) -> Vec<Series> {
    rows.into_iter()
        .map(|(name, data)| Series::plain(name, data))
        .collect()
}

fn into_slices(counts: IndexMap<String, u64>) -> Vec<Slice> {
    counts
        .into_iter()
        .map(|(name, value)| Slice {
            name,
            value: value as f64,
        })
        .collect()
}
