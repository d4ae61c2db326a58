//! Velocity regression insights
//!
//! Compares the two most recent named sprints (sorter order, not arrival
//! order; the sentinel bucket is dropped before comparison) and emits one
//! insight per regressed dimension: completed task count and summed effort.
//! Increases and ties emit nothing; this detector only ever reports
//! regressions, so severity is always in `[-5, -1]`.

use crate::analytics::buckets::group_by_bucket;
use crate::types::{FieldKeys, Insight, Task};

/// Decrease percentage points per severity step.
const SEVERITY_STEP_PCT: f64 = 20.0;

/// Regression insights from the two most recent named sprints.
///
/// `effort_field` is the already-resolved record field to sum (typically
/// `keys.actual_days` or `keys.estimate_days`); missing or non-numeric
/// values sum as 0. Returns an empty vec when fewer than two named sprints
/// exist or nothing regressed.
pub fn velocity_insights(tasks: &[Task], keys: &FieldKeys, effort_field: &str) -> Vec<Insight> {
    let grouping = group_by_bucket(tasks, |t| t.field_str(&keys.sprint));
    let named = grouping.named_buckets();
    if named.len() < 2 {
        return Vec::new();
    }

    let current = named[named.len() - 1];
    let previous = named[named.len() - 2];
    let current_tasks = &grouping.tasks_by_bucket[current.as_str()];
    let previous_tasks = &grouping.tasks_by_bucket[previous.as_str()];

    let mut insights = Vec::new();

    let current_count = current_tasks.len();
    let previous_count = previous_tasks.len();
    if current_count < previous_count {
        let pct = decrease_pct(current_count as f64, previous_count as f64);
        insights.push(Insight {
            text: format!(
                "Completed tasks dropped {:.1}% in {} ({} vs {} tasks)",
                pct, current, current_count, previous_count
            ),
            severity: severity_for(pct),
        });
    }

    let sum_effort = |bucket: &[&Task]| -> f64 {
        bucket
            .iter()
            .map(|t| t.field_number(effort_field).unwrap_or(0.0))
            .sum()
    };
    let current_effort = sum_effort(current_tasks);
    let previous_effort = sum_effort(previous_tasks);
    if current_effort < previous_effort {
        let pct = decrease_pct(current_effort, previous_effort);
        insights.push(Insight {
            text: format!(
                "Delivered effort dropped {:.1}% in {} ({} vs {} days)",
                pct, current, current_effort, previous_effort
            ),
            severity: severity_for(pct),
        });
    }

    insights
}

fn decrease_pct(current: f64, previous: f64) -> f64 {
    (previous - current) / previous * 100.0
}

/// Severity is one step per 20% of decrease, floored at -1, capped at -5.
fn severity_for(pct: f64) -> i32 {
    let steps = (pct / SEVERITY_STEP_PCT).floor() as i64;
    -(steps.clamp(1, 5) as i32)
}
