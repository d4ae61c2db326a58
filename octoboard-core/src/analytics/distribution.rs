//! Label and field distribution charts
//!
//! Counts how many Done records carry each explicitly selected value. The
//! selection list is the caller's (it comes from the filter UI); an empty
//! selection yields an empty chart rather than fanning out over every
//! distinct value in the collection.

use crate::types::{label_name, ChartData, Series, Task};

/// Field name that routes selection through the label list.
pub const LABELS_FIELD: &str = "labels";

/// Done-record counts for each selected value of `field`.
///
/// For [`LABELS_FIELD`] a record matches when any of its labels (either
/// producer shape) carries the value; for every other field the
/// string-coerced field value must equal it.
pub fn field_distribution(tasks: &[Task], field: &str, selected: &[String]) -> ChartData {
    if selected.is_empty() {
        return ChartData::default();
    }

    let done: Vec<&Task> = tasks.iter().filter(|t| t.is_done()).collect();
    let data: Vec<f64> = selected
        .iter()
        .map(|value| {
            done.iter()
                .filter(|task| task_has_value(task, field, value))
                .count() as f64
        })
        .collect();

    ChartData {
        categories: selected.to_vec(),
        series: vec![Series::plain("Tasks", data)],
    }
}

fn task_has_value(task: &Task, field: &str, value: &str) -> bool {
    if field == LABELS_FIELD {
        task.labels
            .iter()
            .filter_map(label_name)
            .any(|name| name == value)
    } else {
        task.field_str(field).as_deref() == Some(value)
    }
}
