//! Line codec for the save file.
//!
//! Format, one task per line, fields trimmed after splitting on `|`:
//!
//! ```text
//! T | <done> | <description>
//! D | <done> | <description> | <by>
//! E | <done> | <description> | <from> | <to>
//! ```
//!
//! `<done>` is `1` or `0`. Time fields are written as originally entered.

use crate::model::task::{Task, TaskKind, TaskType, TaskValidationError, FIELD_DELIMITER};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DONE_FLAG: &str = "1";
const NOT_DONE_FLAG: &str = "0";

/// Reason a single line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    FieldCount {
        task_type: TaskType,
        expected: usize,
        actual: usize,
    },
    /// Fewer than the three common fields.
    Truncated(usize),
    UnknownType(String),
    InvalidDoneFlag(String),
    Invalid(TaskValidationError),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount {
                task_type,
                expected,
                actual,
            } => write!(
                f,
                "`{}` line needs {expected} fields, found {actual}",
                task_type.symbol()
            ),
            Self::Truncated(actual) => write!(f, "line needs at least 3 fields, found {actual}"),
            Self::UnknownType(tag) => write!(f, "unknown task type `{tag}`"),
            Self::InvalidDoneFlag(flag) => write!(f, "invalid done flag `{flag}`"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for DecodeError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Encodes one task as a save-file line (without trailing newline).
pub fn encode_task(task: &Task) -> String {
    let flag = if task.is_done() {
        DONE_FLAG
    } else {
        NOT_DONE_FLAG
    };
    let mut fields = vec![task.task_type().symbol(), flag, task.description()];
    match task.kind() {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => fields.push(by.raw()),
        TaskKind::Event { from, to } => {
            fields.push(from.raw());
            fields.push(to.raw());
        }
    }
    fields.join(" | ")
}

/// Encodes every task, one line each, in list order.
pub fn encode<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<String> {
    tasks.into_iter().map(encode_task).collect()
}

/// Decodes one save-file line.
pub fn decode_line(line: &str) -> Result<Task, DecodeError> {
    let fields = line
        .split(FIELD_DELIMITER)
        .map(str::trim)
        .collect::<Vec<_>>();
    if fields.len() < 3 {
        return Err(DecodeError::Truncated(fields.len()));
    }

    let task_type = TaskType::from_symbol(fields[0])
        .ok_or_else(|| DecodeError::UnknownType(fields[0].to_string()))?;
    let expected = match task_type {
        TaskType::Todo => 3,
        TaskType::Deadline => 4,
        TaskType::Event => 5,
    };
    if fields.len() != expected {
        return Err(DecodeError::FieldCount {
            task_type,
            expected,
            actual: fields.len(),
        });
    }

    let done = match fields[1] {
        DONE_FLAG => true,
        NOT_DONE_FLAG => false,
        other => return Err(DecodeError::InvalidDoneFlag(other.to_string())),
    };

    let task = match task_type {
        TaskType::Todo => Task::todo(fields[2])?,
        TaskType::Deadline => Task::deadline(fields[2], fields[3])?,
        TaskType::Event => Task::event(fields[2], fields[3], fields[4])?,
    };
    Ok(task.with_done(done))
}

/// Decodes all lines, skipping blank and malformed ones.
///
/// Skipped lines are logged with their 1-based line number; decoding as a
/// whole never fails.
pub fn decode<I, S>(lines: I) -> Vec<Task>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tasks = Vec::new();
    for (number, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line) {
            Ok(task) => tasks.push(task),
            Err(err) => warn!(
                "event=task_decode module=storage status=skipped line={} reason={}",
                number + 1,
                err
            ),
        }
    }
    tasks
}
