//! The host-owned chat message, seen through a narrow read/update contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreResult;

/// Read and update access to one message owned by the host.
///
/// The annotator never holds the message itself; it reads a boolean flag and
/// the rendered content, and asks the host to persist changes.
pub trait MessageHandle {
    /// Read a boolean flag. Missing or non-boolean flags read as `None`.
    fn flag(&self, scope: &str, key: &str) -> Option<bool>;

    /// Persist a boolean flag.
    fn set_flag(&mut self, scope: &str, key: &str, value: bool) -> StoreResult<()>;

    /// The message's rendered content.
    fn content(&self) -> &str;

    /// Persist new rendered content.
    fn update_content(&mut self, content: String) -> StoreResult<()>;
}

/// Unique identifier for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// Generate a new random message ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An in-memory chat message with scoped flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier.
    #[serde(default)]
    pub id: MessageId,
    /// Rendered content.
    #[serde(default)]
    pub content: String,
    /// Flags grouped by scope, then key.
    #[serde(default)]
    pub flags: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl ChatMessage {
    /// Create a message with the given content and no flags.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            flags: BTreeMap::new(),
        }
    }
}

impl MessageHandle for ChatMessage {
    fn flag(&self, scope: &str, key: &str) -> Option<bool> {
        self.flags.get(scope)?.get(key)?.as_bool()
    }

    fn set_flag(&mut self, scope: &str, key: &str, value: bool) -> StoreResult<()> {
        self.flags
            .entry(scope.to_string())
            .or_default()
            .insert(key.to_string(), serde_json::Value::Bool(value));
        Ok(())
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn update_content(&mut self, content: String) -> StoreResult<()> {
        self.content = content;
        Ok(())
    }
}
