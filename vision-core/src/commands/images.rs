//! Image Index builder and attachment upload
//!
//! Attachments live under `{user}/{task}/`. Each refresh lists that prefix and
//! replaces the task's slot with public URLs in listing order.

use chrono::Utc;
use log::{debug, warn};

use crate::domain::{task_image_path, task_image_prefix, BlobEntry, Identity, TaskId};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{BlobStore, IdentityService};
use crate::state::{ImageIndex, SharedState};

/// Rebuilds Image Index slots from storage listings
pub struct ImageIndexBuilder;

impl ImageIndexBuilder {
    /// Public URLs for listed entries, skipping storage placeholders
    pub fn urls_for<B>(store: &B, identity: &Identity, task_id: &TaskId, entries: &[BlobEntry]) -> Vec<String>
    where
        B: BlobStore + ?Sized,
    {
        entries
            .iter()
            .filter(|entry| !entry.is_placeholder())
            .map(|entry| store.public_url(&task_image_path(&identity.id, task_id, &entry.name)))
            .collect()
    }

    /// List one task's attachments. A failed listing yields no URLs.
    pub async fn fetch<B>(store: &B, identity: &Identity, task_id: &TaskId) -> Vec<String>
    where
        B: BlobStore + ?Sized,
    {
        let prefix = task_image_prefix(&identity.id, task_id);
        let urls = match store.list(&prefix).await {
            Ok(entries) => Self::urls_for(store, identity, task_id, &entries),
            Err(e) => {
                warn!("listing images under {} failed: {}", prefix, e);
                Vec::new()
            }
        };
        debug!("task {} has {} images", task_id, urls.len());
        urls
    }

    /// Refresh one task's slot.
    ///
    /// Without an identity this is a no-op and storage is never contacted.
    /// A failed or empty listing leaves the slot empty.
    pub async fn refresh<B, S>(store: &B, index: &S, identity: Option<&Identity>, task_id: &TaskId)
    where
        B: BlobStore + ?Sized,
        S: SharedState<ImageIndex>,
    {
        let Some(identity) = identity else {
            debug!("no signed-in user, skipping images for task {}", task_id);
            return;
        };
        let urls = Self::fetch(store, identity, task_id).await;
        index.write_with(|images| images.replace(task_id.clone(), urls));
    }
}

/// `{unix_millis}-{file_name}`, so repeated uploads of one file never collide
pub fn stored_file_name(file_name: &str, unix_millis: i64) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    format!("{}-{}", unix_millis, base)
}

/// Upload an attachment for a task, then refresh its slot.
///
/// Returns the stored object path.
pub async fn upload_task_image<G, S>(
    gateway: &G,
    index: &S,
    task_id: &TaskId,
    file_name: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> GatewayResult<String>
where
    G: IdentityService + BlobStore + ?Sized,
    S: SharedState<ImageIndex>,
{
    let identity = gateway.current_user().await?.ok_or(GatewayError::MissingIdentity)?;

    let name = stored_file_name(file_name, Utc::now().timestamp_millis());
    let path = task_image_path(&identity.id, task_id, &name);
    gateway.upload(&path, bytes, content_type).await.map_err(|e| {
        warn!("upload to {} failed: {}", path, e);
        e
    })?;

    ImageIndexBuilder::refresh(gateway, index, Some(&identity), task_id).await;
    Ok(path)
}
