//! Command handlers
//!
//! Each handler takes the gateway and the view state it touches, and returns
//! a future. The UI drives them with `spawn_local`; tests drive them with a
//! single-threaded runtime.

mod auth;
mod images;
mod tasks;
mod toggle;

pub use auth::{sign_in, sign_out, sign_up};
pub use images::{stored_file_name, upload_task_image, ImageIndexBuilder};
pub use tasks::{add_task, delete_task, load_vision, load_vision_summaries, load_visions, sync_tasks, VisionSummary};
pub use toggle::{ToggleController, ToggleOutcome};
