//! Single-turn command engine.
//!
//! # Responsibility
//! - Parse one input line, apply it to the task list, persist, and reply.
//! - Expose the same `handle(text) -> text` turn to every front-end.
//!
//! # Invariants
//! - A failed command leaves the task list and save file unchanged.
//! - Every successful mutation is followed by a full save, unless saving was
//!   suspended by an earlier I/O failure.
//! - The engine never exits the process; `bye` only sets `Response::exit`.

pub mod reply;
pub mod sort;

use crate::command::{parse, Command, ParseError};
use crate::config::EngineConfig;
use crate::model::task::{Task, TaskValidationError};
use crate::storage::TaskFile;
use crate::store::task_list::{StoreError, TaskList};
use log::{debug, error, warn};
use sort::SortMode;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing failure of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Parse(ParseError),
    Store(StoreError),
    InvalidTask(TaskValidationError),
}

impl CommandError {
    /// Stable snake_case identifier of the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(ParseError::UnknownCommand(_)) => "unknown_command",
            Self::Parse(ParseError::EmptyDescription) => "empty_description",
            Self::Parse(ParseError::EmptyField { .. }) => "empty_field",
            Self::Parse(ParseError::MissingFlag { .. }) => "missing_flag",
            Self::Parse(ParseError::DuplicateFlag { .. }) => "duplicate_flag",
            Self::Parse(ParseError::MisorderedFlags { .. }) => "misordered_flags",
            Self::Parse(ParseError::InvalidIndex(_)) => "invalid_index",
            Self::Parse(ParseError::InvalidDate(_)) => "invalid_date",
            Self::Store(StoreError::IndexOutOfRange { .. }) => "index_out_of_range",
            Self::Store(StoreError::DuplicateTask(_)) => "duplicate_task",
            Self::InvalidTask(_) => "invalid_task",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<TaskValidationError> for CommandError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

/// Reply to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    /// Set by `bye`; the caller decides how to end the session.
    pub exit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persistence {
    Active,
    /// Saving failed once; the session continues in memory.
    Suspended,
}

struct Outcome {
    text: String,
    mutated: bool,
    exit: bool,
}

impl Outcome {
    fn query(text: String) -> Self {
        Self {
            text,
            mutated: false,
            exit: false,
        }
    }

    fn mutation(text: String) -> Self {
        Self {
            text,
            mutated: true,
            exit: false,
        }
    }
}

/// Owns the task list and its save file.
pub struct Engine {
    tasks: TaskList,
    file: TaskFile,
    persistence: Persistence,
}

impl Engine {
    /// Loads the save file named by `config`.
    ///
    /// An unreadable save file is logged and replaced by an empty list.
    pub fn open(config: &EngineConfig) -> Self {
        let file = TaskFile::new(&config.data_file);
        let loaded = file.load().unwrap_or_else(|err| {
            warn!(
                "event=engine_open module=engine status=degraded error_code=load_failed path={} error={}",
                file.path().display(),
                err
            );
            Vec::new()
        });
        Self::with_tasks(TaskList::from_tasks(loaded, config.duplicate_policy), file)
    }

    /// Builds an engine around an existing list without reading `file`.
    pub fn with_tasks(tasks: TaskList, file: TaskFile) -> Self {
        Self {
            tasks,
            file,
            persistence: Persistence::Active,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Whether saves still reach the disk.
    pub fn is_persisting(&self) -> bool {
        self.persistence == Persistence::Active
    }

    /// Banner and task count shown when a session starts.
    pub fn greeting(&self) -> String {
        reply::greeting(self.tasks.size())
    }

    /// Processes one line and returns the reply text.
    pub fn handle(&mut self, line: &str) -> String {
        self.respond(line).text
    }

    /// Processes one line; blank input yields an empty reply.
    pub fn respond(&mut self, line: &str) -> Response {
        if line.trim().is_empty() {
            return Response {
                text: String::new(),
                exit: false,
            };
        }

        match self.execute(line) {
            Ok(outcome) => {
                let mut text = outcome.text;
                if outcome.mutated {
                    if let Some(warning) = self.persist() {
                        text.push('\n');
                        text.push_str(&warning);
                    }
                }
                Response {
                    text,
                    exit: outcome.exit,
                }
            }
            Err(err) => {
                debug!(
                    "event=command module=engine status=rejected error_code={}",
                    err.code()
                );
                Response {
                    text: format!("Error: {err}"),
                    exit: false,
                }
            }
        }
    }

    fn execute(&mut self, line: &str) -> Result<Outcome, CommandError> {
        let command = parse(line)?;
        debug!(
            "event=command module=engine status=start command={} mutating={}",
            command.keyword(),
            command.is_mutating()
        );

        let outcome = match command {
            Command::Bye => Outcome {
                text: reply::FAREWELL.to_string(),
                mutated: false,
                exit: true,
            },
            Command::List => Outcome::query(reply::numbered(
                "Here are the tasks in your list:",
                self.tasks.iter_numbered(),
            )),
            Command::Mark(index) => Outcome::mutation(reply::marked(self.tasks.mark(index)?)),
            Command::Unmark(index) => {
                Outcome::mutation(reply::unmarked(self.tasks.unmark(index)?))
            }
            Command::Delete(index) => {
                let removed = self.tasks.remove(index)?;
                Outcome::mutation(reply::removed(&removed, self.tasks.size()))
            }
            Command::Todo { description } => self.add(Task::todo(&description)?)?,
            Command::Deadline { description, by } => {
                self.add(Task::deadline(&description, &by)?)?
            }
            Command::Event {
                description,
                from,
                to,
            } => self.add(Task::event(&description, &from, &to)?)?,
            Command::On(date) => Outcome::query(reply::on_date(
                date,
                self.tasks
                    .iter_numbered()
                    .filter(|(_, task)| task.occurs_on(date)),
            )),
            Command::Find(keyword) => Outcome::query(reply::numbered(
                "Here are the matching tasks in your list:",
                self.tasks
                    .find(&keyword)
                    .into_iter()
                    .enumerate()
                    .map(|(i, task)| (i + 1, task)),
            )),
            Command::Sort(mode) => {
                let view = SortMode::from_mode_text(&mode).sorted(self.tasks.tasks());
                let header = if mode.is_empty() {
                    "Here are the tasks in your list:".to_string()
                } else {
                    format!("Here are the tasks in your list ({mode}):")
                };
                Outcome::query(reply::numbered(
                    &header,
                    view.into_iter().enumerate().map(|(i, task)| (i + 1, task)),
                ))
            }
        };
        Ok(outcome)
    }

    fn add(&mut self, task: Task) -> Result<Outcome, CommandError> {
        let count = self.tasks.size() + 1;
        let added = self.tasks.add(task)?;
        Ok(Outcome::mutation(reply::added(added, count)))
    }

    /// Saves the full list; returns a user-facing warning on failure.
    fn persist(&mut self) -> Option<String> {
        if self.persistence == Persistence::Suspended {
            return None;
        }
        match self.file.save(self.tasks.tasks()) {
            Ok(()) => None,
            Err(err) => {
                error!(
                    "event=persist module=engine status=error error_code=save_failed error={}",
                    err
                );
                self.persistence = Persistence::Suspended;
                Some(reply::persistence_warning(&err.to_string()))
            }
        }
    }
}
