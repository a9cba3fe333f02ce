//! Gateway Layer - Core Traits
//!
//! Abstract interfaces for the hosted backend. Futures are not `Send`: in the
//! browser everything runs on one thread and network I/O is the only overlap.

use async_trait::async_trait;

use crate::domain::{BlobEntry, Identity, NewTask, Session, Task, TaskId, Vision, VisionId};
use crate::error::GatewayResult;

/// Read access to the `visions` collection
#[async_trait(?Send)]
pub trait VisionRepository: Send + Sync {
    async fn list_visions(&self) -> GatewayResult<Vec<Vision>>;

    /// One vision, or `None` when no row matches
    async fn find_vision(&self, id: &VisionId) -> GatewayResult<Option<Vision>>;
}

/// The `tasks` collection
#[async_trait(?Send)]
pub trait TaskRepository: Send + Sync {
    /// Tasks of one vision, oldest first
    async fn list_by_vision(&self, vision_id: &VisionId) -> GatewayResult<Vec<Task>>;

    /// Insert and return the stored row
    async fn create(&self, task: &NewTask) -> GatewayResult<Task>;

    /// `set completed = value where id = task_id`
    async fn set_completed(&self, task_id: &TaskId, completed: bool) -> GatewayResult<()>;

    async fn delete(&self, task_id: &TaskId) -> GatewayResult<()>;
}

/// Hosted authentication
#[async_trait(?Send)]
pub trait IdentityService: Send + Sync {
    /// The signed-in user, or `None` when there is no session
    async fn current_user(&self) -> GatewayResult<Option<Identity>>;

    async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> GatewayResult<()>;

    /// Start a session; later calls are made on its behalf
    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session>;

    /// End the session locally even if the remote call fails
    async fn sign_out(&self) -> GatewayResult<()>;

    /// Adopt a session persisted by an earlier page load
    fn restore_session(&self, session: Session);
}

/// Object storage scoped by path prefix
#[async_trait(?Send)]
pub trait BlobStore: Send + Sync {
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<BlobEntry>>;

    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> GatewayResult<()>;

    /// Stable public URL for an object; no signing, no expiry
    fn public_url(&self, path: &str) -> String;
}

/// Everything the application needs from the hosted backend
pub trait Gateway: IdentityService + VisionRepository + TaskRepository + BlobStore {}

impl<T> Gateway for T where T: IdentityService + VisionRepository + TaskRepository + BlobStore {}
