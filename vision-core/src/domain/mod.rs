//! Domain Layer
//!
//! Entities as the client sees them. The gateway is the durable owner of every
//! record; these are transient, view-lifetime copies.

mod ids;
mod identity;
mod task;
mod vision;
mod blob;

pub use ids::{TaskId, UserId, VisionId};
pub use identity::{Identity, Session};
pub use task::{NewTask, Task};
pub use vision::Vision;
pub use blob::{task_image_path, task_image_prefix, BlobEntry, EMPTY_FOLDER_PLACEHOLDER};
