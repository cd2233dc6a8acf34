//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its three variants.
//! - Provide validated constructors and done-state transitions.
//! - Provide variant-aware queries (`occurs_on`, ordering moment, duplicate key).
//!
//! # Invariants
//! - `description` is non-empty and trimmed.
//! - Event `to` is strictly after `from` when both endpoints are structured.
//! - No field contains the persistence delimiter `|`.

use crate::model::moment::{Moment, TimeField, TimeKey};
use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Delimiter reserved by the line-oriented persistence format.
pub const FIELD_DELIMITER: char = '|';

/// Discriminant of the task variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    Todo,
    Deadline,
    Event,
}

impl TaskType {
    /// Single-letter symbol used in listings and in the save file.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Todo => "T",
            Self::Deadline => "D",
            Self::Event => "E",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "T" => Some(Self::Todo),
            "D" => Some(Self::Deadline),
            "E" => Some(Self::Event),
            _ => None,
        }
    }
}

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { by: TimeField },
    Event { from: TimeField, to: TimeField },
}

/// Validation failures raised by task constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyDescription,
    EmptyTime(&'static str),
    ReservedDelimiter(&'static str),
    /// Event end is not strictly after its start.
    InvalidEventWindow { from: Moment, to: Moment },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "the description of a task cannot be empty"),
            Self::EmptyTime(field) => write!(f, "the `{field}` time of a task cannot be empty"),
            Self::ReservedDelimiter(field) => write!(
                f,
                "the {field} of a task cannot contain `{FIELD_DELIMITER}`"
            ),
            Self::InvalidEventWindow { from, to } => {
                write!(f, "event end ({to}) must be after its start ({from})")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// One entry in the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

/// Key under which two tasks count as the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    task_type: TaskType,
    description: String,
    times: Vec<TimeKey>,
}

impl Task {
    /// Creates a plain todo.
    pub fn todo(description: &str) -> Result<Self, TaskValidationError> {
        Self::build(description, TaskKind::Todo)
    }

    /// Creates a deadline; `by` is parsed best-effort.
    pub fn deadline(description: &str, by: &str) -> Result<Self, TaskValidationError> {
        let by = time_field(by, "by")?;
        Self::build(description, TaskKind::Deadline { by })
    }

    /// Creates an event spanning `from` to `to`.
    ///
    /// # Errors
    /// - `InvalidEventWindow` when both endpoints parse and `to <= from`.
    pub fn event(description: &str, from: &str, to: &str) -> Result<Self, TaskValidationError> {
        let from = time_field(from, "from")?;
        let to = time_field(to, "to")?;
        if let (Some(start), Some(end)) = (from.moment(), to.moment()) {
            if end.as_date_time() <= start.as_date_time() {
                return Err(TaskValidationError::InvalidEventWindow {
                    from: start,
                    to: end,
                });
            }
        }
        Self::build(description, TaskKind::Event { from, to })
    }

    fn build(description: &str, kind: TaskKind) -> Result<Self, TaskValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        if description.contains(FIELD_DELIMITER) {
            return Err(TaskValidationError::ReservedDelimiter("description"));
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn task_type(&self) -> TaskType {
        match self.kind {
            TaskKind::Todo => TaskType::Todo,
            TaskKind::Deadline { .. } => TaskType::Deadline,
            TaskKind::Event { .. } => TaskType::Event,
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    /// Builder-style variant of [`Task::mark_done`], used by decoders.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Whether this task falls on `date`.
    ///
    /// Deadlines match on their due date, events on either endpoint's date.
    /// Unparsed time text never matches; todos never match.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match &self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline { by } => by.falls_on(date),
            TaskKind::Event { from, to } => from.falls_on(date) || to.falls_on(date),
        }
    }

    /// Earliest structured moment: deadline due time or event start.
    pub fn earliest_moment(&self) -> Option<NaiveDateTime> {
        let field = match &self.kind {
            TaskKind::Todo => return None,
            TaskKind::Deadline { by } => by,
            TaskKind::Event { from, .. } => from,
        };
        field.moment().map(|moment| moment.as_date_time())
    }

    pub fn duplicate_key(&self) -> DuplicateKey {
        let times = match &self.kind {
            TaskKind::Todo => Vec::new(),
            TaskKind::Deadline { by } => vec![by.key()],
            TaskKind::Event { from, to } => vec![from.key(), to.key()],
        };
        DuplicateKey {
            task_type: self.task_type(),
            description: self.description.trim().to_lowercase(),
            times,
        }
    }

    /// Same variant, same case-insensitive description, same time keys.
    pub fn is_duplicate_of(&self, other: &Task) -> bool {
        self.duplicate_key() == other.duplicate_key()
    }

    fn status_icon(&self) -> &'static str {
        if self.done {
            "X"
        } else {
            " "
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.task_type().symbol(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {by})"),
            TaskKind::Event { from, to } => write!(f, " (from: {from} to: {to})"),
        }
    }
}

fn time_field(text: &str, name: &'static str) -> Result<TimeField, TaskValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTime(name));
    }
    if trimmed.contains(FIELD_DELIMITER) {
        return Err(TaskValidationError::ReservedDelimiter(name));
    }
    Ok(TimeField::parse(trimmed))
}
