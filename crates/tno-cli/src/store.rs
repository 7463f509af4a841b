//! A message persisted as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use tno_core::{ChatMessage, MessageHandle, StoreResult};
use tracing::debug;

/// A [`ChatMessage`] backed by a JSON file. Every update is written through.
pub struct FileMessage {
    path: PathBuf,
    message: ChatMessage,
}

impl FileMessage {
    /// Load a message from `path`.
    pub fn open(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read message '{}': {e}", path.display()))?;
        let message = serde_json::from_str(&text)
            .map_err(|e| format!("invalid message '{}': {e}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            message,
        })
    }

    fn persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.message)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), id = %self.message.id, "message written");
        Ok(())
    }
}

impl MessageHandle for FileMessage {
    fn flag(&self, scope: &str, key: &str) -> Option<bool> {
        self.message.flag(scope, key)
    }

    fn set_flag(&mut self, scope: &str, key: &str, value: bool) -> StoreResult<()> {
        self.message.set_flag(scope, key, value)?;
        self.persist()
    }

    fn content(&self) -> &str {
        self.message.content()
    }

    fn update_content(&mut self, content: String) -> StoreResult<()> {
        self.message.update_content(content)?;
        self.persist()
    }
}
