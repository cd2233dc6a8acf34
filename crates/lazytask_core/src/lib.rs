//! Core logic for LazyTask, a line-oriented task list with dates.
//! Front-ends (console, GUI bridge) only feed text into [`Engine`].

pub mod command;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use command::{parse, Command, ParseError};
pub use config::EngineConfig;
pub use engine::{CommandError, Engine, Response};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::moment::{Moment, TimeField};
pub use model::task::{Task, TaskKind, TaskType, TaskValidationError};
pub use storage::codec::{decode, decode_line, encode, encode_task, DecodeError};
pub use storage::{StorageError, TaskFile};
pub use store::task_list::{DuplicatePolicy, StoreError, TaskList};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
