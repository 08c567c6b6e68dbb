use jiff::Timestamp;

use crate::models::coded::{Coded, label_conversions};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Coded for Priority {
    const KIND: &'static str = "priority";
    const TABLE: &'static [(Self, u8, &'static str)] = &[
        (Priority::Low, 1, "low"),
        (Priority::Medium, 2, "medium"),
        (Priority::High, 3, "high"),
    ];
    const FALLBACK: Self = Priority::Medium;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Coded for Difficulty {
    const KIND: &'static str = "difficulty";
    const TABLE: &'static [(Self, u8, &'static str)] = &[
        (Difficulty::Easy, 1, "easy"),
        (Difficulty::Medium, 2, "medium"),
        (Difficulty::Hard, 3, "hard"),
    ];
    const FALLBACK: Self = Difficulty::Medium;
}

label_conversions!(Priority, Difficulty);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Task {
    /// Collection-scoped id, never reused while the tasks file exists
    pub id: u64,
    pub title: String,
    /// Empty when the user gave no description
    pub description: String,
    pub priority: Priority,
    pub difficulty: Difficulty,
    pub completed: bool,
    pub created: Timestamp,
    /// Only set while `completed` is true
    pub completed_at: Option<Timestamp>,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            created: crate::models::now(),
            ..Task::default()
        }
    }

    pub fn complete(&mut self, at: Timestamp) {
        self.completed = true;
        self.completed_at = Some(at);
    }

    pub fn reopen(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_open() {
        let task = Task::new(4, "Buy milk");
        assert_eq!(task.id, 4);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_reopen_clears_completion_time() {
        let mut task = Task::new(1, "Write report");
        task.complete(crate::models::now());
        assert!(task.completed);
        assert!(task.completed_at.is_some());

        task.reopen();
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_parse_and_display_labels() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
