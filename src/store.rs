//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The task list and
//! image index are handed to vision-core commands through `SharedState`
//! adapters, so optimistic flips and rollbacks land directly in the store.

use leptos::prelude::*;
use reactive_stores::Store;
use vision_core::commands::VisionSummary;
use vision_core::domain::VisionId;
use vision_core::state::{ImageIndex, SharedState, TaskListState};

use crate::models::Vision;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Visions listed on the dashboard, with their progress
    pub visions: Vec<VisionSummary>,
    /// Vision currently open
    pub vision: Option<Vision>,
    /// Tasks of the open vision, creation order
    pub tasks: TaskListState,
    /// Attachment URLs per task of the open vision
    pub images: ImageIndex,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Task list field as a command-facing cell
#[derive(Clone, Copy)]
pub struct TasksCell(pub AppStore);

impl SharedState<TaskListState> for TasksCell {
    fn read_with<R>(&self, f: impl FnOnce(&TaskListState) -> R) -> R {
        f(&self.0.tasks().read_untracked())
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut TaskListState) -> R) -> R {
        f(&mut self.0.tasks().write())
    }
}

/// Image index field as a command-facing cell
#[derive(Clone, Copy)]
pub struct ImagesCell(pub AppStore);

impl SharedState<ImageIndex> for ImagesCell {
    fn read_with<R>(&self, f: impl FnOnce(&ImageIndex) -> R) -> R {
        f(&self.0.images().read_untracked())
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut ImageIndex) -> R) -> R {
        f(&mut self.0.images().write())
    }
}

// ========================
// Store Helper Functions
// ========================

/// Point the task list at a vision.
///
/// Tasks and images of a different vision are dropped; results still in
/// flight for it are discarded when they arrive.
pub fn store_open_vision(store: &AppStore, vision_id: &VisionId) {
    store.vision().set(None);
    if store.tasks().write().open(vision_id) {
        store.images().write().clear();
    }
}

/// Forget all user data (sign-out)
pub fn store_clear(store: &AppStore) {
    store.visions().write().clear();
    store.vision().set(None);
    store.tasks().write().clear();
    store.images().write().clear();
}
