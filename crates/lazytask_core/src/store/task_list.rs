//! Ordered task list with index- and keyword-based operations.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by task list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Index outside `1..=size`.
    IndexOutOfRange { index: i64, size: usize },
    /// An equivalent task already exists; carries its description.
    DuplicateTask(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { size: 0, .. } => {
                write!(f, "There are no tasks in your list yet.")
            }
            Self::IndexOutOfRange { index, size } => write!(
                f,
                "Task number {index} is out of range. Valid range: 1..{size}."
            ),
            Self::DuplicateTask(description) => {
                write!(f, "This task is already in your list: {description}")
            }
        }
    }
}

impl Error for StoreError {}

/// Whether [`TaskList::add`] rejects duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Allow,
}

/// Ordered task collection.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    duplicate_policy: DuplicatePolicy,
}

impl TaskList {
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            tasks: Vec::new(),
            duplicate_policy,
        }
    }

    /// Wraps already-persisted tasks; duplicates among them are kept.
    pub fn from_tasks(tasks: Vec<Task>, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            tasks,
            duplicate_policy,
        }
    }

    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks paired with their 1-based index.
    pub fn iter_numbered(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(i, task)| (i + 1, task))
    }

    pub fn get(&self, index: i64) -> StoreResult<&Task> {
        let position = self.position(index)?;
        Ok(&self.tasks[position])
    }

    pub fn get_mut(&mut self, index: i64) -> StoreResult<&mut Task> {
        let position = self.position(index)?;
        Ok(&mut self.tasks[position])
    }

    /// Appends `task` to the end of the list.
    ///
    /// # Errors
    /// - `DuplicateTask` when the policy is `Reject` and an equivalent task exists.
    pub fn add(&mut self, task: Task) -> StoreResult<&Task> {
        if self.duplicate_policy == DuplicatePolicy::Reject {
            if let Some(existing) = self.tasks.iter().find(|t| t.is_duplicate_of(&task)) {
                return Err(StoreError::DuplicateTask(existing.to_string()));
            }
        }
        self.tasks.push(task);
        let last = self.tasks.len() - 1;
        Ok(&self.tasks[last])
    }

    /// Removes and returns the task at `index`.
    pub fn remove(&mut self, index: i64) -> StoreResult<Task> {
        let position = self.position(index)?;
        Ok(self.tasks.remove(position))
    }

    /// Tasks whose description contains `keyword`, case-insensitively, in list order.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.description().to_lowercase().contains(&needle))
            .collect()
    }

    /// Marks the task at `index` done. Idempotent.
    pub fn mark(&mut self, index: i64) -> StoreResult<&Task> {
        let task = self.get_mut(index)?;
        task.mark_done();
        Ok(task)
    }

    /// Marks the task at `index` not done. Idempotent.
    pub fn unmark(&mut self, index: i64) -> StoreResult<&Task> {
        let task = self.get_mut(index)?;
        task.mark_not_done();
        Ok(task)
    }

    fn position(&self, index: i64) -> StoreResult<usize> {
        let size = self.tasks.len();
        usize::try_from(index)
            .ok()
            .filter(|value| (1..=size).contains(value))
            .map(|value| value - 1)
            .ok_or(StoreError::IndexOutOfRange { index, size })
    }
}
