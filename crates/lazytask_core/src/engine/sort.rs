//! Sort policy for the `sort` command.

use crate::model::task::Task;
use std::cmp::Ordering;

/// Recognized sort modes; anything else keeps list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Name,
    Status,
    Time,
    Unchanged,
}

impl SortMode {
    /// Maps normalized mode text (`by name|by status|by time`) to a mode.
    pub fn from_mode_text(text: &str) -> Self {
        match text {
            "by name" => Self::Name,
            "by status" => Self::Status,
            "by time" => Self::Time,
            _ => Self::Unchanged,
        }
    }

    /// Returns a stably sorted view of `tasks`.
    ///
    /// - `Name`: case-insensitive description order.
    /// - `Status`: not-done before done.
    /// - `Time`: ascending earliest structured moment; tasks without one last.
    pub fn sorted<'a>(self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut view = tasks.iter().collect::<Vec<_>>();
        match self {
            Self::Name => view.sort_by_cached_key(|task| task.description().to_lowercase()),
            Self::Status => view.sort_by_key(|task| task.is_done()),
            Self::Time => view.sort_by(|a, b| compare_time(a, b)),
            Self::Unchanged => {}
        }
        view
    }
}

fn compare_time(a: &Task, b: &Task) -> Ordering {
    match (a.earliest_moment(), b.earliest_moment()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
