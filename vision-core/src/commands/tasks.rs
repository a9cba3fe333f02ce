//! Task List Synchronizer and task mutations
//!
//! The view is rebuilt from the gateway on navigation; add and delete touch
//! the local list only after the gateway has answered. Every write first
//! checks that the list is still open on the vision it was fetched for.

use futures::future::join_all;
use log::{debug, info, warn};

use super::images::ImageIndexBuilder;
use crate::domain::{NewTask, Task, TaskId, Vision, VisionId};
use crate::gateway::{Gateway, TaskRepository, VisionRepository};
use crate::state::{ImageIndex, SharedState, TaskListState};

/// A vision with the completion of its first tasks, for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct VisionSummary {
    pub vision: Vision,
    /// `None` when the vision's tasks could not be loaded
    pub progress: Option<u8>,
}

/// Open a vision's task list, fetch its tasks and rebuild every task's image
/// slot.
///
/// A failed fetch empties the view; earlier results are never kept. Results
/// for a vision that is no longer open are discarded.
pub async fn sync_tasks<G, T, I>(gateway: &G, tasks: &T, index: &I, vision_id: &VisionId)
where
    G: Gateway + ?Sized,
    T: SharedState<TaskListState>,
    I: SharedState<ImageIndex>,
{
    if tasks.write_with(|state| state.open(vision_id)) {
        index.write_with(ImageIndex::clear);
    }

    let mut fetched = match gateway.list_by_vision(vision_id).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!("loading tasks of vision {} failed: {}", vision_id, e);
            Vec::new()
        }
    };
    fetched.retain(|task| &task.vision_id == vision_id);

    let ids: Vec<TaskId> = fetched.iter().map(|task| task.id.clone()).collect();
    let written = tasks.write_with(|state| {
        if !state.is_showing(vision_id) {
            return false;
        }
        state.replace(fetched);
        true
    });
    if !written {
        debug!("vision {} was left before its tasks arrived", vision_id);
        return;
    }
    info!("vision {} has {} tasks", vision_id, ids.len());
    if ids.is_empty() {
        return;
    }

    let identity = match gateway.current_user().await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            debug!("no signed-in user, skipping images of vision {}", vision_id);
            return;
        }
        Err(e) => {
            warn!("identity lookup failed: {}", e);
            return;
        }
    };
    let identity = &identity;
    let slots = join_all(ids.iter().map(|id| async move {
        (id.clone(), ImageIndexBuilder::fetch(gateway, identity, id).await)
    }))
    .await;

    if !tasks.read_with(|state| state.is_showing(vision_id)) {
        debug!("vision {} was left before its images arrived", vision_id);
        return;
    }
    index.write_with(|images| {
        for (id, urls) in slots {
            images.replace(id, urls);
        }
    });
}

/// Create a task and append it to the view.
///
/// Blank titles and missing sign-in are ignored; gateway failures are logged
/// and dropped. The row is only appended while its vision is still open.
pub async fn add_task<G, T>(gateway: &G, tasks: &T, vision_id: &VisionId, title: &str) -> Option<Task>
where
    G: Gateway + ?Sized,
    T: SharedState<TaskListState>,
{
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    let identity = match gateway.current_user().await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            debug!("no signed-in user, not adding task");
            return None;
        }
        Err(e) => {
            warn!("identity lookup failed: {}", e);
            return None;
        }
    };

    let new_task = NewTask::new(title, vision_id.clone(), identity.id);
    match gateway.create(&new_task).await {
        Ok(created) => {
            tasks.write_with(|state| {
                if state.is_showing(vision_id) {
                    state.push(created.clone());
                }
            });
            Some(created)
        }
        Err(e) => {
            warn!("creating task under vision {} failed: {}", vision_id, e);
            None
        }
    }
}

/// Delete a task; the view changes only once the gateway confirms
pub async fn delete_task<G, T, I>(gateway: &G, tasks: &T, index: &I, task_id: &TaskId) -> bool
where
    G: Gateway + ?Sized,
    T: SharedState<TaskListState>,
    I: SharedState<ImageIndex>,
{
    match gateway.delete(task_id).await {
        Ok(()) => {
            tasks.write_with(|state| state.remove(task_id));
            index.write_with(|images| images.remove(task_id));
            true
        }
        Err(e) => {
            warn!("deleting task {} failed: {}", task_id, e);
            false
        }
    }
}

pub async fn load_vision<G>(gateway: &G, vision_id: &VisionId) -> Option<Vision>
where
    G: Gateway + ?Sized,
{
    match gateway.find_vision(vision_id).await {
        Ok(vision) => vision,
        Err(e) => {
            warn!("loading vision {} failed: {}", vision_id, e);
            None
        }
    }
}

pub async fn load_visions<G>(gateway: &G) -> Vec<Vision>
where
    G: Gateway + ?Sized,
{
    gateway.list_visions().await.unwrap_or_else(|e| {
        warn!("loading visions failed: {}", e);
        Vec::new()
    })
}

/// Every vision with its progress, computed by the same first-tasks rule as
/// the vision page
pub async fn load_vision_summaries<G>(gateway: &G) -> Vec<VisionSummary>
where
    G: Gateway + ?Sized,
{
    let visions = load_visions(gateway).await;
    join_all(visions.into_iter().map(|vision| async move {
        let progress = match gateway.list_by_vision(&vision.id).await {
            Ok(fetched) => {
                let mut state = TaskListState::new();
                state.replace(fetched);
                Some(state.progress())
            }
            Err(e) => {
                warn!("progress of vision {} unavailable: {}", vision.id, e);
                None
            }
        };
        VisionSummary { vision, progress }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use parking_lot::Mutex;

    use super::*;
    use crate::gateway::memory::MemoryGateway;

    fn cells() -> (Mutex<TaskListState>, Mutex<ImageIndex>) {
        (Mutex::new(TaskListState::new()), Mutex::new(ImageIndex::new()))
    }

    #[tokio::test]
    async fn test_sync_orders_and_caps_view() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v1", 10).with_tasks("v2", 2);
        let (tasks, index) = cells();

        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;

        let state = tasks.lock();
        assert_eq!(state.len(), 10);
        assert_eq!(state.visible().len(), 7);
        assert!(state.all().windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_sync_progress_scenario() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v1", 10);
        for id in ["t0", "t3", "t6", "t8"] {
            gateway.set_completed(&TaskId::new(id), true).await.unwrap();
        }
        let (tasks, index) = cells();

        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;

        assert_eq!(tasks.lock().progress(), 43);
    }

    #[tokio::test]
    async fn test_sync_failure_clears_stale_tasks() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v1", 3);
        let (tasks, index) = cells();
        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;
        assert_eq!(tasks.lock().len(), 3);

        *gateway.fail_task_list.lock() = true;
        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;

        assert!(tasks.lock().is_empty());
    }

    #[tokio::test]
    async fn test_sync_builds_image_slots_once_per_task() {
        let gateway = MemoryGateway::signed_in("u1")
            .with_tasks("v1", 3)
            .with_blob("u1/t1/a.png")
            .with_blob("u1/t1/b.png");
        let (tasks, index) = cells();

        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;

        assert_eq!(gateway.blob_list_calls.load(Ordering::SeqCst), 3);
        assert_eq!(gateway.identity_calls.load(Ordering::SeqCst), 1);
        assert_eq!(index.lock().count(&TaskId::new("t1")), 2);
        assert_eq!(index.lock().count(&TaskId::new("t0")), 0);
    }

    #[tokio::test]
    async fn test_sync_signed_out_skips_images() {
        let gateway = MemoryGateway::new().with_tasks("v1", 2).with_blob("u1/t0/a.png");
        let (tasks, index) = cells();

        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;

        assert_eq!(tasks.lock().len(), 2);
        assert_eq!(gateway.blob_list_calls.load(Ordering::SeqCst), 0);
        assert!(index.lock().get(&TaskId::new("t0")).is_empty());
    }

    #[tokio::test]
    async fn test_add_task_appends_created_row() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v1", 1);
        let (tasks, index) = cells();
        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;

        let created = add_task(&gateway, &tasks, &VisionId::new("v1"), "  Drink water ").await.unwrap();

        assert_eq!(created.title, "Drink water");
        assert_eq!(created.user_id.as_str(), "u1");
        assert!(!created.completed);
        assert_eq!(tasks.lock().all().last().unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_add_task_ignores_blank_and_signed_out() {
        let (tasks, _) = cells();
        let signed_out = MemoryGateway::new();
        assert!(add_task(&signed_out, &tasks, &VisionId::new("v1"), "Read").await.is_none());

        let gateway = MemoryGateway::signed_in("u1");
        assert!(add_task(&gateway, &tasks, &VisionId::new("v1"), "   ").await.is_none());
        assert_eq!(gateway.remote_task_count(), 0);
        assert!(tasks.lock().is_empty());
    }

    #[tokio::test]
    async fn test_add_task_failure_is_dropped() {
        let gateway = MemoryGateway::signed_in("u1");
        *gateway.fail_create.lock() = true;
        let (tasks, _) = cells();

        assert!(add_task(&gateway, &tasks, &VisionId::new("v1"), "Read").await.is_none());
        assert!(tasks.lock().is_empty());
    }

    #[tokio::test]
    async fn test_delete_task_removes_after_confirmation() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v1", 2);
        let (tasks, index) = cells();
        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;

        assert!(delete_task(&gateway, &tasks, &index, &TaskId::new("t0")).await);

        assert_eq!(tasks.lock().len(), 1);
        assert_eq!(gateway.remote_task_count(), 1);
        assert!(!index.lock().contains(&TaskId::new("t0")));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_task() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v1", 2);
        let (tasks, index) = cells();
        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;
        *gateway.fail_delete.lock() = true;

        assert!(!delete_task(&gateway, &tasks, &index, &TaskId::new("t0")).await);
        assert_eq!(tasks.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_late_result_for_left_vision_is_dropped() {
        let gateway = MemoryGateway::signed_in("u1")
            .with_tasks("v1", 3)
            .with_tasks("v2", 1)
            .with_blob("u1/t2/a.png");
        let (tasks, index) = cells();
        let release_v1 = gateway.gate_next_list();

        let v1 = VisionId::new("v1");
        let v2 = VisionId::new("v2");
        futures::join!(
            sync_tasks(&gateway, &tasks, &index, &v1),
            async {
                sync_tasks(&gateway, &tasks, &index, &v2).await;
                release_v1.send(()).unwrap();
            }
        );

        let state = tasks.lock();
        assert_eq!(state.len(), 1);
        assert!(state.all().iter().all(|task| task.vision_id.as_str() == "v2"));
        assert!(state.is_showing(&VisionId::new("v2")));
        assert!(!index.lock().contains(&TaskId::new("t2")));
    }

    #[tokio::test]
    async fn test_added_task_not_shown_under_other_vision() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v2", 1);
        let (tasks, index) = cells();
        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v2")).await;

        let created = add_task(&gateway, &tasks, &VisionId::new("v1"), "Stretch").await;

        assert!(created.is_some());
        assert_eq!(tasks.lock().len(), 1);
        assert!(tasks.lock().all().iter().all(|task| task.vision_id.as_str() == "v2"));
    }

    #[tokio::test]
    async fn test_switching_vision_clears_image_slots() {
        let gateway = MemoryGateway::signed_in("u1").with_tasks("v1", 1).with_blob("u1/t0/a.png");
        let (tasks, index) = cells();
        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v1")).await;
        assert_eq!(index.lock().count(&TaskId::new("t0")), 1);

        sync_tasks(&gateway, &tasks, &index, &VisionId::new("v9")).await;

        assert!(tasks.lock().is_empty());
        assert!(!index.lock().contains(&TaskId::new("t0")));
    }

    #[tokio::test]
    async fn test_vision_summaries_use_visible_window() {
        let gateway = MemoryGateway::signed_in("u1")
            .with_vision("v1", "Get Fit")
            .with_vision("v2", "Learn Coding")
            .with_tasks("v1", 10);
        for id in ["t0", "t3", "t6", "t8"] {
            gateway.set_completed(&TaskId::new(id), true).await.unwrap();
        }

        let summaries = load_vision_summaries(&gateway).await;

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].vision.title, "Get Fit");
        assert_eq!(summaries[0].progress, Some(43));
        assert_eq!(summaries[1].progress, Some(0));
    }

    #[tokio::test]
    async fn test_vision_summary_failed_fetch_has_no_progress() {
        let gateway = MemoryGateway::signed_in("u1").with_vision("v1", "Get Fit");
        *gateway.fail_task_list.lock() = true;

        let summaries = load_vision_summaries(&gateway).await;

        assert_eq!(summaries[0].progress, None);
    }

    #[tokio::test]
    async fn test_load_vision() {
        let gateway = MemoryGateway::new().with_vision("v1", "Get Fit");

        let vision = load_vision(&gateway, &VisionId::new("v1")).await.unwrap();
        assert_eq!(vision.title, "Get Fit");
        assert!(load_vision(&gateway, &VisionId::new("nope")).await.is_none());
        assert_eq!(load_visions(&gateway).await.len(), 1);
    }
}
