//! In-memory gateway for tests
//!
//! Failure injection, call counters and gated updates let tests observe the
//! optimistic window between a local flip and the gateway's answer.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use futures::channel::oneshot;
use parking_lot::Mutex;

use crate::domain::{
    BlobEntry, Identity, NewTask, Session, Task, TaskId, Vision, VisionId,
};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{BlobStore, IdentityService, TaskRepository, VisionRepository};

pub(crate) const PUBLIC_BASE: &str = "https://cdn.test/task-images";

#[derive(Default)]
pub(crate) struct MemoryGateway {
    identity: Mutex<Option<Identity>>,
    visions: Mutex<Vec<Vision>>,
    tasks: Mutex<Vec<Task>>,
    blobs: Mutex<Vec<String>>,
    next_id: AtomicUsize,

    pub failing_updates: Mutex<HashSet<TaskId>>,
    pub fail_task_list: Mutex<bool>,
    pub fail_blob_list: Mutex<bool>,
    pub fail_delete: Mutex<bool>,
    pub fail_create: Mutex<bool>,
    pub fail_upload: Mutex<bool>,

    pub blob_list_calls: AtomicUsize,
    pub identity_calls: AtomicUsize,
    pub update_calls: AtomicUsize,

    update_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

pub(crate) fn fail() -> GatewayError {
    GatewayError::Http { status: 503, message: "service unavailable".to_string() }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self { next_id: AtomicUsize::new(100), ..Default::default() }
    }

    pub fn signed_in(user_id: &str) -> Self {
        let gateway = Self::new();
        *gateway.identity.lock() = Some(Identity::new(user_id, format!("{}@example.com", user_id)));
        gateway
    }

    pub fn with_vision(self, id: &str, title: &str) -> Self {
        self.visions.lock().push(Vision {
            id: VisionId::new(id),
            title: title.to_string(),
            description: None,
        });
        self
    }

    /// Seed `count` tasks for a vision, created one minute apart
    pub fn with_tasks(self, vision_id: &str, count: usize) -> Self {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        {
            let mut tasks = self.tasks.lock();
            for i in 0..count {
                let mut task = Task::new(format!("t{}", i), vision_id, "u1", format!("task {}", i));
                task.created_at = Some(start + Duration::minutes(i as i64));
                tasks.push(task);
            }
        }
        self
    }

    pub fn with_blob(self, path: &str) -> Self {
        self.blobs.lock().push(path.to_string());
        self
    }

    pub fn remote_completed(&self, id: &str) -> Option<bool> {
        self.tasks.lock().iter().find(|t| t.id.as_str() == id).map(|t| t.completed)
    }

    pub fn remote_task_count(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn blob_paths(&self) -> Vec<String> {
        self.blobs.lock().clone()
    }

    pub fn fail_updates_for(&self, id: &str) {
        self.failing_updates.lock().insert(TaskId::new(id));
    }

    /// Hold the next `set_completed` until the returned sender fires
    pub fn gate_next_update(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.update_gates.lock().push_back(rx);
        tx
    }

    /// Hold the next `list_by_vision` until the returned sender fires
    pub fn gate_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().push_back(rx);
        tx
    }
}

#[async_trait(?Send)]
impl IdentityService for MemoryGateway {
    async fn current_user(&self) -> GatewayResult<Option<Identity>> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.identity.lock().clone())
    }

    async fn sign_up(&self, _email: &str, password: &str, _display_name: &str) -> GatewayResult<()> {
        if password.len() < 6 {
            return Err(GatewayError::Auth("Password should be at least 6 characters".to_string()));
        }
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        if password != "secret" {
            return Err(GatewayError::Auth("Invalid login credentials".to_string()));
        }
        let user = Identity::new("u1", email);
        *self.identity.lock() = Some(user.clone());
        Ok(Session { access_token: "token".to_string(), refresh_token: None, user })
    }

    async fn sign_out(&self) -> GatewayResult<()> {
        *self.identity.lock() = None;
        Ok(())
    }

    fn restore_session(&self, session: Session) {
        *self.identity.lock() = Some(session.user);
    }
}

#[async_trait(?Send)]
impl VisionRepository for MemoryGateway {
    async fn list_visions(&self) -> GatewayResult<Vec<Vision>> {
        Ok(self.visions.lock().clone())
    }

    async fn find_vision(&self, id: &VisionId) -> GatewayResult<Option<Vision>> {
        Ok(self.visions.lock().iter().find(|v| &v.id == id).cloned())
    }
}

#[async_trait(?Send)]
impl TaskRepository for MemoryGateway {
    async fn list_by_vision(&self, vision_id: &VisionId) -> GatewayResult<Vec<Task>> {
        let gate = self.list_gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if *self.fail_task_list.lock() {
            return Err(fail());
        }
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .iter()
            .filter(|t| &t.vision_id == vision_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn create(&self, task: &NewTask) -> GatewayResult<Task> {
        if *self.fail_create.lock() {
            return Err(fail());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Task {
            id: TaskId::new(id.to_string()),
            vision_id: task.vision_id.clone(),
            user_id: task.user_id.clone(),
            title: task.title.clone(),
            completed: task.completed,
            created_at: Some(Utc::now()),
        };
        self.tasks.lock().push(stored.clone());
        Ok(stored)
    }

    async fn set_completed(&self, task_id: &TaskId, completed: bool) -> GatewayResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.update_gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.failing_updates.lock().contains(task_id) {
            return Err(fail());
        }
        if let Some(task) = self.tasks.lock().iter_mut().find(|t| &t.id == task_id) {
            task.completed = completed;
        }
        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> GatewayResult<()> {
        if *self.fail_delete.lock() {
            return Err(fail());
        }
        self.tasks.lock().retain(|t| &t.id != task_id);
        Ok(())
    }
}

#[async_trait(?Send)]
impl BlobStore for MemoryGateway {
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<BlobEntry>> {
        self.blob_list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_blob_list.lock() {
            return Err(fail());
        }
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        Ok(self
            .blobs
            .lock()
            .iter()
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(BlobEntry::new)
            .collect())
    }

    async fn upload(&self, path: &str, _bytes: Vec<u8>, _content_type: &str) -> GatewayResult<()> {
        if *self.fail_upload.lock() {
            return Err(fail());
        }
        self.blobs.lock().push(path.to_string());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", PUBLIC_BASE, path)
    }
}
