use super::format_duration;
use super::greeting;
use super::TaskBoard;
use crate::domain::models::TaskFilter;

#[test]
fn it_seeds_demo_data() {
    let board = TaskBoard::default();
    assert_eq!(board.tasks().len(), 4);
    assert_eq!(board.entries().len(), 2);
    assert_eq!(board.visible().len(), 4);
}

#[test]
fn it_adds_tasks_with_the_default_project() {
    let mut board = TaskBoard::empty();
    assert!(board.add_task("  Write lab report  "));

    let task = &board.tasks()[0];
    assert_eq!(task.title, "Write lab report");
    assert_eq!(task.project, "General");
    assert!(!task.completed);
}

#[test]
fn it_ignores_blank_titles() {
    let mut board = TaskBoard::empty();
    assert!(!board.add_task("   "));
    assert!(board.tasks().is_empty());
}

#[test]
fn it_toggles_the_selected_task() {
    let mut board = TaskBoard::default();
    board.toggle_selected();
    assert!(board.tasks()[0].completed);

    board.toggle_selected();
    assert!(!board.tasks()[0].completed);
}

#[test]
fn it_deletes_the_selected_task() {
    let mut board = TaskBoard::default();
    board.select_next();
    board.delete_selected();

    assert_eq!(board.tasks().len(), 3);
    assert!(board
        .tasks()
        .iter()
        .all(|task| return task.title != "Review History Notes"));
}

#[test]
fn it_filters_tasks() {
    let mut board = TaskBoard::default();
    assert_eq!(board.filter, TaskFilter::All);

    board.cycle_filter();
    assert_eq!(board.filter, TaskFilter::Active);
    assert_eq!(board.visible().len(), 3);

    board.cycle_filter();
    assert_eq!(board.filter, TaskFilter::Completed);
    assert_eq!(board.visible().len(), 1);
    assert_eq!(board.visible()[0].title, "Review History Notes");

    board.cycle_filter();
    assert_eq!(board.filter, TaskFilter::All);
}

#[test]
fn it_operates_on_the_filtered_view() {
    let mut board = TaskBoard::default();
    board.cycle_filter();
    // Active filter: selection 0 is the calculus assignment.
    board.toggle_selected();

    let completed: Vec<&str> = board
        .tasks()
        .iter()
        .filter(|task| return task.completed)
        .map(|task| return task.title.as_str())
        .collect();
    assert_eq!(
        completed,
        vec!["Complete Calculus Assignment", "Review History Notes"]
    );
}

#[test]
fn it_clamps_selection_to_the_visible_list() {
    let mut board = TaskBoard::default();
    for _ in 0..10 {
        board.select_next();
    }
    assert_eq!(board.selected(), 3);

    board.select_previous();
    assert_eq!(board.selected(), 2);

    let mut empty = TaskBoard::empty();
    empty.select_next();
    assert_eq!(empty.selected(), 0);
    empty.delete_selected();
    assert!(empty.tasks().is_empty());
}

#[test]
fn it_summarizes_the_board() {
    let summary = TaskBoard::default().summary();
    assert_eq!(summary.tasks_done, 1);
    assert_eq!(summary.tasks_total, 4);
    assert!((summary.completion_ratio - 0.25).abs() < f64::EPSILON);
    // 3600s + 2500s of tracked time.
    assert_eq!(summary.tracked, "1h 41m");
    assert_eq!(summary.weekly_hours.len(), 7);
}

#[test]
fn it_formats_durations() {
    insta::assert_snapshot!(format_duration(0), @"0h 0m");
    insta::assert_snapshot!(format_duration(3600), @"1h 0m");
    insta::assert_snapshot!(format_duration(6100), @"1h 41m");
}

#[test]
fn it_greets_by_hour() {
    assert!(greeting(9).starts_with("Good Morning"));
    assert!(greeting(14).starts_with("Good Afternoon"));
    assert!(greeting(22).starts_with("Good Evening"));
    assert!(greeting(2).starts_with("Good Evening"));
}
