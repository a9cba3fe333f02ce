//! Vision

use serde::{Deserialize, Serialize};

use super::ids::VisionId;

/// A user-defined goal grouping tasks. Read-only from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vision {
    pub id: VisionId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
