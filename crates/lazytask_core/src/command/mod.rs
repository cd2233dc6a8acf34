//! User command parsing.
//!
//! # Responsibility
//! - Turn one raw input line into a validated [`Command`].
//! - Report structural input problems as typed [`ParseError`] values.
//!
//! # Invariants
//! - Parsing is pure: no I/O, no dependency on task list state.
//! - Index arguments are syntax-checked only; bounds are the engine's concern.

mod parse;

pub use parse::parse;

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Structured command produced by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    /// 1-based index, not bounds-checked.
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: String,
    },
    Event {
        description: String,
        from: String,
        to: String,
    },
    On(NaiveDate),
    Find(String),
    /// Lower-cased mode text; empty when no mode was given.
    Sort(String),
}

impl Command {
    /// Canonical keyword, for logging.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Bye => "bye",
            Self::List => "list",
            Self::Mark(_) => "mark",
            Self::Unmark(_) => "unmark",
            Self::Delete(_) => "delete",
            Self::Todo { .. } => "todo",
            Self::Deadline { .. } => "deadline",
            Self::Event { .. } => "event",
            Self::On(_) => "on",
            Self::Find(_) => "find",
            Self::Sort(_) => "sort",
        }
    }

    /// Whether applying this command changes the task list.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Mark(_)
                | Self::Unmark(_)
                | Self::Delete(_)
                | Self::Todo { .. }
                | Self::Deadline { .. }
                | Self::Event { .. }
        )
    }
}

/// Syntax errors for a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Keyword not recognized (or a no-argument keyword given arguments).
    UnknownCommand(String),
    EmptyDescription,
    EmptyField {
        command: &'static str,
        field: &'static str,
    },
    MissingFlag {
        command: &'static str,
        flag: &'static str,
    },
    DuplicateFlag {
        command: &'static str,
        flag: &'static str,
    },
    MisorderedFlags {
        command: &'static str,
        first: &'static str,
        second: &'static str,
    },
    /// Argument is not a base-10 integer literal.
    InvalidIndex(String),
    InvalidDate(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(_) => {
                write!(f, "I'm sorry, but I don't know what that means :-(")
            }
            Self::EmptyDescription => write!(f, "The description of a todo cannot be empty."),
            Self::EmptyField { command, field } => write!(
                f,
                "The {field} of a {command} cannot be empty. Usage: {}",
                usage(command)
            ),
            Self::MissingFlag { command, flag } => {
                write!(f, "Missing '{flag}'. Usage: {}", usage(command))
            }
            Self::DuplicateFlag { command, flag } => write!(
                f,
                "'{flag}' may appear only once. Usage: {}",
                usage(command)
            ),
            Self::MisorderedFlags {
                command,
                first,
                second,
            } => write!(
                f,
                "'{first}' must come before '{second}'. Usage: {}",
                usage(command)
            ),
            Self::InvalidIndex(raw) if raw.is_empty() => write!(f, "Please provide a task number."),
            Self::InvalidIndex(raw) => write!(f, "'{raw}' is not a valid task number."),
            Self::InvalidDate(raw) => write!(
                f,
                "Please provide a valid date in yyyy-MM-dd format (got '{raw}')."
            ),
        }
    }
}

impl Error for ParseError {}

fn usage(command: &str) -> &'static str {
    match command {
        "deadline" => "deadline <description> /by <when>",
        "event" => "event <description> /from <start> /to <end>",
        "find" => "find <keyword>",
        _ => "todo <description>",
    }
}
