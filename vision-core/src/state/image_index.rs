//! Image Index: task id -> public attachment URLs

use std::collections::HashMap;

use crate::domain::TaskId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageIndex {
    slots: HashMap<TaskId, Vec<String>>,
}

impl ImageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one task's slot wholesale
    pub fn replace(&mut self, task: TaskId, urls: Vec<String>) {
        self.slots.insert(task, urls);
    }

    pub fn get(&self, task: &TaskId) -> &[String] {
        self.slots.get(task).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, task: &TaskId) -> usize {
        self.get(task).len()
    }

    pub fn contains(&self, task: &TaskId) -> bool {
        self.slots.contains_key(task)
    }

    pub fn remove(&mut self, task: &TaskId) {
        self.slots.remove(task);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
