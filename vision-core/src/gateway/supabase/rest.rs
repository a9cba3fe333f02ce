//! Row endpoints (`/rest/v1`) for the `visions` and `tasks` collections

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, Url};
use serde_json::json;

use super::SupabaseClient;
use crate::config::GatewayConfig;
use crate::domain::{NewTask, Task, TaskId, Vision, VisionId};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{TaskRepository, VisionRepository};

const VISIONS: &str = "rest/v1/visions";
const TASKS: &str = "rest/v1/tasks";

/// `{table}?{column}=eq.{value}` plus any extra pairs
pub(crate) fn filtered_url(
    config: &GatewayConfig,
    table: &str,
    column: &str,
    value: &str,
    extra: &[(&str, &str)],
) -> GatewayResult<Url> {
    let mut url = config.endpoint(table)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(column, &format!("eq.{}", value));
        for (key, val) in extra {
            pairs.append_pair(key, val);
        }
    }
    Ok(url)
}

pub(crate) fn tasks_by_vision_url(config: &GatewayConfig, vision_id: &VisionId) -> GatewayResult<Url> {
    filtered_url(
        config,
        TASKS,
        "vision_id",
        vision_id.as_str(),
        &[("select", "*"), ("order", "created_at.asc")],
    )
}

#[async_trait(?Send)]
impl VisionRepository for SupabaseClient {
    async fn list_visions(&self) -> GatewayResult<Vec<Vision>> {
        let mut url = self.config.endpoint(VISIONS)?;
        url.query_pairs_mut().append_pair("select", "*");
        self.send_json(|| self.request(Method::GET, url.clone())).await
    }

    async fn find_vision(&self, id: &VisionId) -> GatewayResult<Option<Vision>> {
        let url = filtered_url(&self.config, VISIONS, "id", id.as_str(), &[("select", "*"), ("limit", "1")])?;
        let rows: Vec<Vision> = self.send_json(|| self.request(Method::GET, url.clone())).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait(?Send)]
impl TaskRepository for SupabaseClient {
    async fn list_by_vision(&self, vision_id: &VisionId) -> GatewayResult<Vec<Task>> {
        let url = tasks_by_vision_url(&self.config, vision_id)?;
        self.send_json(|| self.request(Method::GET, url.clone())).await
    }

    async fn create(&self, task: &NewTask) -> GatewayResult<Task> {
        let url = self.config.endpoint(TASKS)?;
        let rows: Vec<Task> = self
            .send_json(|| {
                self.request(Method::POST, url.clone())
                    .header("Prefer", "return=representation")
                    .json(task)
            })
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("insert returned no row".to_string()))
    }

    async fn set_completed(&self, task_id: &TaskId, completed: bool) -> GatewayResult<()> {
        let url = filtered_url(&self.config, TASKS, "id", task_id.as_str(), &[])?;
        let body = json!({ "completed": completed });
        self.send(|| self.request(Method::PATCH, url.clone()).json(&body)).await?;
        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> GatewayResult<()> {
        let url = filtered_url(&self.config, TASKS, "id", task_id.as_str(), &[])?;
        self.send(|| self.request(Method::DELETE, url.clone())).await?;
        debug!("deleted task {}", task_id);
        Ok(())
    }
}
