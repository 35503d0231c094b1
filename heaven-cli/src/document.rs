//! Documents the `watch` command renders into

use async_trait::async_trait;
use colored::*;
use heaven_core::{Document, DocumentError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Prints each fragment written to its single element on stdout
pub struct TerminalDocument {
    element_id: String,
}

impl TerminalDocument {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

#[async_trait]
impl Document for TerminalDocument {
    async fn replace_inner(&self, id: &str, content: &str) -> Result<(), DocumentError> {
        if id != self.element_id {
            return Err(DocumentError::ElementNotFound(id.to_string()));
        }

        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        println!("{}", format!("── #{} @ {}", id, now).dimmed());
        println!("{}", content);
        Ok(())
    }
}

/// Backs its single element with a file that is rewritten on every update
///
/// Each update is written to its own sibling temp file and renamed over the
/// target, so readers only ever see a complete fragment and an abandoned
/// write never reaches the target.
pub struct FileDocument {
    element_id: String,
    path: PathBuf,
    write_lock: Mutex<()>,
    next_temp: AtomicU64,
}

impl FileDocument {
    pub fn new(element_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            element_id: element_id.into(),
            path: path.into(),
            write_lock: Mutex::new(()),
            next_temp: AtomicU64::new(0),
        }
    }

    fn temp_path(&self) -> Result<PathBuf, DocumentError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            DocumentError::Write(format!("{}: not a file path", self.path.display()))
        })?;
        let n = self.next_temp.fetch_add(1, Ordering::Relaxed);
        Ok(self.path.with_file_name(format!(
            ".{}.{}.{}.tmp",
            file_name.to_string_lossy(),
            std::process::id(),
            n
        )))
    }
}

#[async_trait]
impl Document for FileDocument {
    async fn replace_inner(&self, id: &str, content: &str) -> Result<(), DocumentError> {
        if id != self.element_id {
            return Err(DocumentError::ElementNotFound(id.to_string()));
        }

        let temp = self.temp_path()?;
        let _guard = self.write_lock.lock().await;

        if let Err(e) = tokio::fs::write(&temp, content).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(DocumentError::Write(format!("{}: {}", temp.display(), e)));
        }

        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| DocumentError::Write(format!("{}: {}", self.path.display(), e)))
    }
}
