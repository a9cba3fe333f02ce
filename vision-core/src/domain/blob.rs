//! Blob entries and the identity-scoped path convention
//!
//! Attachments for a task live under `{user}/{task}/`.

use serde::Deserialize;

use super::ids::{TaskId, UserId};

/// Marker object the storage service creates for empty folders
pub const EMPTY_FOLDER_PLACEHOLDER: &str = ".emptyFolderPlaceholder";

/// One listed object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlobEntry {
    pub name: String,
}

impl BlobEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == EMPTY_FOLDER_PLACEHOLDER
    }
}

/// `{user}/{task}` listing prefix
pub fn task_image_prefix(user: &UserId, task: &TaskId) -> String {
    format!("{}/{}", user, task)
}

/// `{user}/{task}/{name}` object path
pub fn task_image_path(user: &UserId, task: &TaskId, name: &str) -> String {
    format!("{}/{}/{}", user, task, name)
}
