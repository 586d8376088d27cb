//! Tag aggregation over a task list.

use crate::model::task::Task;
use std::collections::{BTreeMap, HashSet};

/// Returns every distinct tag, in first-seen order.
///
/// Duplicate tags inside one task are tolerated.
pub fn extract_unique_tags(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .flat_map(|task| task.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Number of tasks carrying each tag, keyed by tag name.
pub fn tag_counts(tasks: &[Task]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        let distinct: HashSet<&str> = task.tags.iter().map(String::as_str).collect();
        for tag in distinct {
            *counts.entry(tag.to_string()).or_insert(0) += 1;
        }
    }
    counts
}
