#[cfg(test)]
#[path = "task_board_test.rs"]
mod tests;
use chrono::Local;
use chrono::Timelike;

use crate::domain::models::Task;
use crate::domain::models::TaskFilter;
use crate::domain::models::TimeEntry;

/// Aggregates rendered on the dashboard panel.
#[derive(Clone)]
pub struct DashboardSummary {
    pub greeting: String,
    pub tracked: String,
    pub tasks_done: usize,
    pub tasks_total: usize,
    pub completion_ratio: f64,
    pub streak_days: u32,
    pub weekly_hours: Vec<(&'static str, u64)>,
}

/// In-memory task list and time log, seeded with demo data. State lives for
/// the process only.
pub struct TaskBoard {
    tasks: Vec<Task>,
    entries: Vec<TimeEntry>,
    pub filter: TaskFilter,
    selected: usize,
}

impl Default for TaskBoard {
    fn default() -> TaskBoard {
        let mut completed_review = Task::new("Review History Notes", "University");
        completed_review.completed = true;

        return TaskBoard {
            tasks: vec![
                Task::new("Complete Calculus Assignment", "University"),
                completed_review,
                Task::new("Buy Groceries", "Personal"),
                Task::new("Prepare Presentation Slides", "Work"),
            ],
            entries: vec![
                TimeEntry::new("Study Session", 3600, "University"),
                TimeEntry::new("Client Meeting", 2500, "Work"),
            ],
            filter: TaskFilter::All,
            selected: 0,
        };
    }
}

impl TaskBoard {
    pub fn empty() -> TaskBoard {
        return TaskBoard {
            tasks: vec![],
            entries: vec![],
            filter: TaskFilter::All,
            selected: 0,
        };
    }

    pub fn tasks(&self) -> &[Task] {
        return &self.tasks;
    }

    pub fn entries(&self) -> &[TimeEntry] {
        return &self.entries;
    }

    /// Tasks matching the current filter, in insertion order.
    pub fn visible(&self) -> Vec<&Task> {
        return self
            .tasks
            .iter()
            .filter(|task| return self.filter.matches(task))
            .collect();
    }

    pub fn selected(&self) -> usize {
        return self.selected;
    }

    pub fn add_task(&mut self, title: &str) -> bool {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return false;
        }

        self.tasks.push(Task::new(trimmed, "General"));
        return true;
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };

        if let Some(task) = self.tasks.iter_mut().find(|task| return task.id == id) {
            task.completed = !task.completed;
        }
        self.clamp_selection();
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };

        self.tasks.retain(|task| return task.id != id);
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.clamp_selection();
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.selected += 1;
        self.clamp_selection();
    }

    pub fn summary(&self) -> DashboardSummary {
        let done = self
            .tasks
            .iter()
            .filter(|task| return task.completed)
            .count();
        let total = self.tasks.len();

        let mut ratio = 0.0;
        if total > 0 {
            ratio = done as f64 / total as f64;
        }

        let tracked_seconds: u64 = self
            .entries
            .iter()
            .map(|entry| return entry.duration_seconds)
            .sum();

        return DashboardSummary {
            greeting: greeting(Local::now().hour()),
            tracked: format_duration(tracked_seconds),
            tasks_done: done,
            tasks_total: total,
            completion_ratio: ratio,
            streak_days: 5,
            weekly_hours: vec![
                ("Mon", 4),
                ("Tue", 6),
                ("Wed", 4),
                ("Thu", 7),
                ("Fri", 5),
                ("Sat", 2),
                ("Sun", 3),
            ],
        };
    }

    fn selected_id(&self) -> Option<String> {
        return self
            .visible()
            .get(self.selected)
            .map(|task| return task.id.to_string());
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible().len();
        if visible == 0 {
            self.selected = 0;
            return;
        }

        if self.selected >= visible {
            self.selected = visible - 1;
        }
    }
}

fn greeting(hour: u32) -> String {
    let part = match hour {
        5..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        _ => "Good Evening",
    };

    return part.to_string();
}

fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    return format!("{hours}h {minutes}m");
}
