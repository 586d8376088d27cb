use std::collections::HashSet;
use todo_core::{
    extract_unique_tags, filter_task_refs, filter_tasks, sorted_tasks, FilterState, Priority,
    SortKey, SortOrder, StatusFilter, Task, TaskSort,
};

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("1", "Write report")
            .with_description("Quarterly numbers")
            .with_priority(Priority::High)
            .with_tags(["work", "urgent"])
            .with_created_at("2026-10-01T09:00:00Z"),
        Task::new("2", "Clean kitchen")
            .with_tags(["home"])
            .with_created_at("2026-10-03T09:00:00Z"),
        Task::new("3", "Book flights")
            .with_description("Work trip to Berlin")
            .with_priority(Priority::Low)
            .with_tags(["travel", "work"])
            .with_due_date("2026-11-02")
            .with_created_at("2026-10-02T09:00:00Z")
            .completed(),
        Task::new("4", "Call plumber").with_priority(Priority::Medium),
    ]
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id.as_str()).collect()
}

#[test]
fn empty_filter_returns_everything_in_order() {
    let tasks = sample_tasks();
    let filtered = filter_tasks(&tasks, &FilterState::default());
    assert_eq!(filtered, tasks);
}

#[test]
fn selected_tag_keeps_only_tagged_tasks() {
    let tasks = vec![
        Task::new("a", "first").with_tags(["work", "urgent"]),
        Task::new("b", "second").with_tags(["home"]),
    ];
    let state = FilterState {
        selected_tags: vec!["work".to_string()],
        ..FilterState::default()
    };

    let filtered = filter_tasks(&tasks, &state);
    assert_eq!(ids(&filtered), vec!["a"]);
}

#[test]
fn tags_use_or_semantics() {
    let tasks = sample_tasks();
    let state = FilterState {
        selected_tags: vec!["home".to_string(), "travel".to_string()],
        ..FilterState::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &state)), vec!["2", "3"]);
}

#[test]
fn criteria_combine_with_and() {
    let tasks = sample_tasks();
    let state = FilterState {
        search_term: "WORK".to_string(),
        selected_priorities: vec![Priority::High, Priority::Low],
        selected_tags: vec!["work".to_string()],
        status: StatusFilter::Active,
    };
    // "3" matches search, priority and tag but is completed.
    let refs = filter_task_refs(&tasks, &state);
    assert!(refs.is_empty());

    let state = FilterState {
        status: StatusFilter::All,
        ..state
    };
    assert_eq!(ids(&filter_tasks(&tasks, &state)), vec!["3"]);
}

#[test]
fn search_without_description_only_checks_title() {
    let tasks = sample_tasks();
    let state = FilterState {
        search_term: "plumb".to_string(),
        ..FilterState::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &state)), vec!["4"]);

    let state = FilterState {
        search_term: "berlin".to_string(),
        ..FilterState::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &state)), vec!["3"]);
}

#[test]
fn unique_tags_form_the_expected_set() {
    let tasks = vec![
        Task::new("1", "x").with_tags(["a", "b"]),
        Task::new("2", "y").with_tags(["b", "c"]),
    ];
    let tags: HashSet<String> = extract_unique_tags(&tasks).into_iter().collect();
    let expected: HashSet<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
    assert_eq!(tags, expected);
}

#[test]
fn sort_then_filter_keeps_sorted_order() {
    let tasks = sample_tasks();
    let sorted = sorted_tasks(&tasks, TaskSort::new(SortKey::CreatedAt, SortOrder::Ascending));
    // "4" has no created_at and sorts last.
    assert_eq!(ids(&sorted), vec!["1", "3", "2", "4"]);

    let state = FilterState {
        selected_tags: vec!["work".to_string()],
        ..FilterState::default()
    };
    assert_eq!(ids(&filter_tasks(&sorted, &state)), vec!["1", "3"]);
}

#[test]
fn sort_decodes_short_order_aliases() {
    let sort: TaskSort = serde_json::from_str(r#"{"key":"due_date","order":"asc"}"#).unwrap();
    assert_eq!(sort, TaskSort::new(SortKey::DueDate, SortOrder::Ascending));
}
