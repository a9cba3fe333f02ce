//! Optimistic task-completion toggle
//!
//! The local flag flips before the gateway is asked. If the gateway refuses,
//! the flag goes back to exactly its old value. Nothing is retried and nothing
//! propagates to the caller beyond the outcome.

use std::collections::HashSet;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::domain::TaskId;
use crate::gateway::TaskRepository;
use crate::state::{SharedState, TaskListState};

/// How a toggle request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The gateway accepted the new value
    Confirmed,
    /// The gateway failed; the old value is back
    RolledBack,
    /// A toggle of the same task was still in flight; nothing happened
    Ignored,
}

/// Tracks which tasks have a completion update in flight
#[derive(Debug, Default)]
pub struct ToggleController {
    in_flight: Mutex<HashSet<TaskId>>,
}

/// Releases the in-flight slot when the round trip ends, however it ends
struct InFlight<'a> {
    set: &'a Mutex<HashSet<TaskId>>,
    id: TaskId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.id);
    }
}

impl ToggleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, id: &TaskId) -> bool {
        self.in_flight.lock().contains(id)
    }

    fn claim(&self, id: &TaskId) -> Option<InFlight<'_>> {
        if !self.in_flight.lock().insert(id.clone()) {
            return None;
        }
        Some(InFlight { set: &self.in_flight, id: id.clone() })
    }

    /// Flip `task_id` from `previous` and reconcile with the gateway
    pub async fn toggle<R, S>(&self, repo: &R, state: &S, task_id: &TaskId, previous: bool) -> ToggleOutcome
    where
        R: TaskRepository + ?Sized,
        S: SharedState<TaskListState>,
    {
        let Some(_slot) = self.claim(task_id) else {
            debug!("toggle of task {} ignored, previous update still pending", task_id);
            return ToggleOutcome::Ignored;
        };

        let next = !previous;
        state.write_with(|tasks| tasks.set_completed(task_id, next));

        match repo.set_completed(task_id, next).await {
            Ok(()) => {
                debug!("task {} completed={} confirmed", task_id, next);
                ToggleOutcome::Confirmed
            }
            Err(e) => {
                warn!("toggle of task {} failed, reverting: {}", task_id, e);
                state.write_with(|tasks| tasks.set_completed(task_id, previous));
                ToggleOutcome::RolledBack
            }
        }
    }
}
