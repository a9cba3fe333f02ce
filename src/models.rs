//! Frontend Models
//!
//! Entities come from vision-core; the page enum is UI-only.

pub use vision_core::domain::{Session, Task, Vision, VisionId};

/// Which screen is showing
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Landing,
    Login,
    Dashboard,
    Vision(VisionId),
}

impl Page {
    /// Pages that need a signed-in user
    pub fn requires_session(&self) -> bool {
        matches!(self, Page::Dashboard | Page::Vision(_))
    }
}
