use thiserror::Error;

use crate::{
    models::{
        now,
        task::{Difficulty, Priority, Task},
    },
    storage::{
        Storage, StorageError,
        codec::{FieldError, check_text_field},
    },
};

#[derive(Debug, Error)]
pub enum AddTaskError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("{0}")]
    InvalidText(#[from] FieldError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct AddTaskParameters {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub difficulty: Difficulty,
}

pub fn add_task(
    storage: &mut impl Storage<Task>,
    parameters: AddTaskParameters,
) -> Result<Task, AddTaskError> {
    let title = parameters.title.trim().to_string();
    if title.is_empty() {
        return Err(AddTaskError::EmptyTitle);
    }
    let description = parameters
        .description
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    check_text_field("title", &title)?;
    check_text_field("description", &description)?;

    let mut task = Task::new(storage.next_id()?, title);
    task.description = description;
    task.priority = parameters.priority;
    task.difficulty = parameters.difficulty;

    storage.create(&task)?;

    Ok(task)
}

#[derive(Debug, Error)]
pub enum CompleteTaskError {
    #[error("Task #{0} not found")]
    TaskNotFound(u64),

    #[error("Task '{0}' is already completed")]
    AlreadyCompleted(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn complete_task(
    storage: &mut impl Storage<Task>,
    id: u64,
) -> Result<Task, CompleteTaskError> {
    let mut task = find_task(storage, id)?.ok_or(CompleteTaskError::TaskNotFound(id))?;

    if task.completed {
        return Err(CompleteTaskError::AlreadyCompleted(task.title));
    }

    task.complete(now());
    storage.update(&task)?;

    Ok(task)
}

#[derive(Debug, Error)]
pub enum ReopenTaskError {
    #[error("Task #{0} not found")]
    TaskNotFound(u64),

    #[error("Task '{0}' is not completed")]
    NotCompleted(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn reopen_task(storage: &mut impl Storage<Task>, id: u64) -> Result<Task, ReopenTaskError> {
    let mut task = find_task(storage, id)?.ok_or(ReopenTaskError::TaskNotFound(id))?;

    if !task.completed {
        return Err(ReopenTaskError::NotCompleted(task.title));
    }

    task.reopen();
    storage.update(&task)?;

    Ok(task)
}

#[derive(Debug, Error)]
pub enum DeleteTaskError {
    #[error("Task #{0} not found")]
    TaskNotFound(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Permanently removes a task and returns what was removed.
pub fn delete_task(storage: &mut impl Storage<Task>, id: u64) -> Result<Task, DeleteTaskError> {
    let task = find_task(storage, id)?.ok_or(DeleteTaskError::TaskNotFound(id))?;

    match storage.delete(id) {
        Ok(()) => Ok(task),
        Err(StorageError::NotFound { .. }) => Err(DeleteTaskError::TaskNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// All tasks in file order, optionally only those with the given priority.
pub fn list_tasks(
    storage: &mut impl Storage<Task>,
    priority: Option<Priority>,
) -> Result<Vec<Task>, StorageError> {
    let tasks = storage.load_all()?;
    Ok(match priority {
        Some(priority) => tasks.into_iter().filter(|t| t.priority == priority).collect(),
        None => tasks,
    })
}

fn find_task(storage: &mut impl Storage<Task>, id: u64) -> Result<Option<Task>, StorageError> {
    Ok(storage.load_all()?.into_iter().find(|t| t.id == id))
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    /// Share of completed tasks, 0.0 for an empty list.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskStats {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
    }
}
