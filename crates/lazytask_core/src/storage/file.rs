//! Save-file load/save.
//!
//! # Invariants
//! - A missing save file loads as an empty list.
//! - `save` writes a sibling temp file and renames it over the target.

use super::codec::{decode, encode};
use super::{StorageError, StorageResult};
use crate::model::task::Task;
use log::{error, info};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Handle to the save file at a fixed path.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the save file.
    ///
    /// # Errors
    /// - Returns `StorageError::Io` when the file exists but cannot be read.
    pub fn load(&self) -> StorageResult<Vec<Task>> {
        let started_at = Instant::now();
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=tasks_load module=storage status=ok mode=missing_file count=0");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(StorageError::io(&self.path, err));
            }
        };

        let tasks = decode(content.lines());
        info!(
            "event=tasks_load module=storage status=ok duration_ms={} count={}",
            started_at.elapsed().as_millis(),
            tasks.len()
        );
        Ok(tasks)
    }

    /// Overwrites the save file with `tasks`, creating parent directories.
    pub fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let started_at = Instant::now();
        match self.write_atomically(tasks) {
            Ok(()) => {
                info!(
                    "event=tasks_save module=storage status=ok duration_ms={} count={}",
                    started_at.elapsed().as_millis(),
                    tasks.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn write_atomically(&self, tasks: &[Task]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }

        let mut content = encode(tasks).join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(|err| StorageError::io(&temp_path, err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| {
            let _ = fs::remove_file(&temp_path);
            StorageError::io(&self.path, err)
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| OsString::from("tasks"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
