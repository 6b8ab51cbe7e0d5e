use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub project: String,
}

impl Task {
    pub fn new(title: &str, project: &str) -> Task {
        return Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            completed: false,
            project: project.to_string(),
        };
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub description: String,
    pub duration_seconds: u64,
    pub project: String,
}

impl TimeEntry {
    pub fn new(description: &str, duration_seconds: u64, project: &str) -> TimeEntry {
        return TimeEntry {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            duration_seconds,
            project: project.to_string(),
        };
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskFilter {
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => return true,
            TaskFilter::Active => return !task.completed,
            TaskFilter::Completed => return task.completed,
        }
    }

    pub fn next(&self) -> TaskFilter {
        match self {
            TaskFilter::All => return TaskFilter::Active,
            TaskFilter::Active => return TaskFilter::Completed,
            TaskFilter::Completed => return TaskFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => return "All",
            TaskFilter::Active => return "Active",
            TaskFilter::Completed => return "Completed",
        }
    }
}
