//! Local view state
//!
//! Transient copies of gateway data for one view. Commands reach the state
//! through `SharedState`, so the same logic drives the reactive UI store and
//! a plain mutex in tests.

mod task_list;
mod image_index;

use std::sync::Arc;

use parking_lot::Mutex;

pub use image_index::ImageIndex;
pub use task_list::{TaskListState, MAX_VISIBLE_TASKS};

/// A cell the command handlers can read and mutate.
///
/// Implementations must not hold the borrow beyond the closure.
pub trait SharedState<T> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> SharedState<T> for Mutex<T> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock())
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<T, S: SharedState<T>> SharedState<T> for Arc<S> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        (**self).read_with(f)
    }

    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        (**self).write_with(f)
    }
}
