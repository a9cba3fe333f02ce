//! Task List State
//!
//! Ordered mirror of one vision's tasks. Only the first `MAX_VISIBLE_TASKS`
//! are shown and only those count towards progress; the collection itself is
//! never truncated.
//!
//! The list remembers which vision it was opened for, so results arriving for
//! a vision the user has already left can be told apart and dropped.

use crate::domain::{Task, TaskId, VisionId};

/// Tasks shown at once
pub const MAX_VISIBLE_TASKS: usize = 7;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskListState {
    vision: Option<VisionId>,
    tasks: Vec<Task>,
}

impl TaskListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace with a freshly fetched list, already in creation order
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Point the list at a vision. Switching to another vision drops the
    /// previous tasks; returns whether it switched.
    pub fn open(&mut self, vision_id: &VisionId) -> bool {
        if self.is_showing(vision_id) {
            return false;
        }
        self.vision = Some(vision_id.clone());
        self.tasks.clear();
        true
    }

    pub fn is_showing(&self, vision_id: &VisionId) -> bool {
        self.vision.as_ref() == Some(vision_id)
    }

    pub fn clear(&mut self) {
        self.vision = None;
        self.tasks.clear();
    }

    /// Newly created tasks are the most recent, so they go last
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| &task.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn completed_of(&self, id: &TaskId) -> Option<bool> {
        self.get(id).map(|task| task.completed)
    }

    /// Set the completion flag; returns the previous value if the task exists
    pub fn set_completed(&mut self, id: &TaskId, completed: bool) -> Option<bool> {
        self.tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .map(|task| std::mem::replace(&mut task.completed, completed))
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn visible(&self) -> &[Task] {
        &self.tasks[..self.tasks.len().min(MAX_VISIBLE_TASKS)]
    }

    /// More tasks exist than are shown
    pub fn is_truncated(&self) -> bool {
        self.tasks.len() > MAX_VISIBLE_TASKS
    }

    pub fn completed_visible(&self) -> usize {
        self.visible().iter().filter(|task| task.completed).count()
    }

    /// Percentage of visible tasks completed, rounded half up; 0 when empty
    pub fn progress(&self) -> u8 {
        let visible = self.visible().len();
        if visible == 0 {
            return 0;
        }
        let completed = self.completed_visible();
        // round(completed / visible * 100) without floating point
        ((completed * 200 + visible) / (2 * visible)) as u8
    }
}
