//! FFI use-case API for GUI-facing calls.
//!
//! # Responsibility
//! - Expose the engine's single-turn `text -> text` entry point via FRB.
//! - Keep one engine per process, created lazily on first use.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Return values are UTF-8 strings with stable meaning.
//! - Persona/theming decoration is left to the GUI; replies are undecorated.

use lazytask_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, Engine,
    EngineConfig,
};
use log::info;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENGINE: OnceLock<Mutex<Engine>> = OnceLock::new();

/// Reply envelope for one GUI submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReply {
    /// Engine reply text (empty for blank input).
    pub reply: String,
    /// `true` after `bye`; the GUI decides whether to close its window.
    pub should_exit: bool,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Startup banner with the current task count.
///
/// # FFI contract
/// - Sync call; first call loads the save file.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_greeting() -> String {
    lock_engine().greeting()
}

/// Submits one line of user text and returns the engine reply.
///
/// # FFI contract
/// - Sync call; mutating commands write the save file before returning.
/// - Never panics; command errors come back as reply text.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_submit(text: String) -> EntryReply {
    let response = lock_engine().respond(&text);
    EntryReply {
        reply: response.text,
        should_exit: response.exit,
    }
}

fn lock_engine() -> MutexGuard<'static, Engine> {
    ENGINE
        .get_or_init(|| {
            let config = EngineConfig::from_env();
            info!(
                "event=ffi_engine_init module=ffi status=ok data_file={}",
                config.data_file.display()
            );
            Mutex::new(Engine::open(&config))
        })
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
