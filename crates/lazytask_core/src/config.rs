//! Engine configuration.
//!
//! # Responsibility
//! - Resolve the save-file path and duplicate policy for one engine.
//!
//! # Invariants
//! - Blank environment values are treated as unset.

use crate::store::task_list::DuplicatePolicy;
use std::path::PathBuf;

/// Environment variable overriding the save-file path.
pub const DATA_FILE_ENV: &str = "LAZYTASK_DATA_FILE";
/// Environment variable switching duplicate rejection off (`1|true|yes`).
pub const ALLOW_DUPLICATES_ENV: &str = "LAZYTASK_ALLOW_DUPLICATES";
/// Save-file path used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "data/lazytask.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub data_file: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
}

impl EngineConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }

    /// Builds a config from `LAZYTASK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup(DATA_FILE_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
        let duplicate_policy = match lookup(ALLOW_DUPLICATES_ENV) {
            Some(raw) if parse_flag(&raw) => DuplicatePolicy::Allow,
            _ => DuplicatePolicy::Reject,
        };
        Self {
            data_file: PathBuf::from(data_file),
            duplicate_policy,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
