//! Task
//!
//! A unit of work under a vision, owned by one user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TaskId, UserId, VisionId};

/// A task row as returned by the `tasks` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub vision_id: VisionId,
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Only used for ordering
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, vision_id: impl Into<VisionId>, user_id: impl Into<UserId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vision_id: vision_id.into(),
            user_id: user_id.into(),
            title: title.into(),
            completed: false,
            created_at: None,
        }
    }
}

/// Insert payload for a new task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub vision_id: VisionId,
    pub user_id: UserId,
    pub completed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>, vision_id: VisionId, user_id: UserId) -> Self {
        Self {
            title: title.into(),
            vision_id,
            user_id,
            completed: false,
        }
    }
}
