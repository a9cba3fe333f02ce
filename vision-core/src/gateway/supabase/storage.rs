//! Object storage endpoints (`/storage/v1`)

use async_trait::async_trait;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Method, Url};
use serde_json::json;

use super::SupabaseClient;
use crate::config::GatewayConfig;
use crate::domain::BlobEntry;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::BlobStore;

/// Listing page size; the view never shows more attachments than this
const LIST_LIMIT: u32 = 100;

/// Characters escaped inside one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// Percent-encode each `/`-separated segment of an object path
pub(crate) fn encode_object_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// `{base}storage/v1/object/public/{bucket}/{path}`
pub(crate) fn public_object_url(config: &GatewayConfig, path: &str) -> String {
    format!(
        "{}storage/v1/object/public/{}/{}",
        config.base_url(),
        encode_object_path(config.image_bucket()),
        encode_object_path(path)
    )
}

fn object_url(config: &GatewayConfig, path: &str) -> GatewayResult<Url> {
    let raw = format!(
        "{}storage/v1/object/{}/{}",
        config.base_url(),
        encode_object_path(config.image_bucket()),
        encode_object_path(path)
    );
    Url::parse(&raw).map_err(|e| GatewayError::Config(format!("invalid object url {:?}: {}", raw, e)))
}

#[async_trait(?Send)]
impl BlobStore for SupabaseClient {
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<BlobEntry>> {
        let url = self
            .config
            .endpoint(&format!("storage/v1/object/list/{}", encode_object_path(self.config.image_bucket())))?;
        let body = json!({
            "prefix": prefix.trim_matches('/'),
            "limit": LIST_LIMIT,
            "offset": 0,
            "sortBy": { "column": "name", "order": "asc" },
        });
        let entries: Vec<BlobEntry> = self.send_json(|| self.request(Method::POST, url.clone()).json(&body)).await?;
        debug!("listed {} objects under {}", entries.len(), prefix);
        Ok(entries)
    }

    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> GatewayResult<()> {
        let url = object_url(&self.config, path)?;
        let size = bytes.len();
        self.send(|| {
            self.request(Method::POST, url.clone())
                .header("Content-Type", content_type)
                .header("x-upsert", "false")
                .body(bytes.clone())
        })
        .await?;
        debug!("uploaded {} bytes to {}", size, path);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.config, path)
    }
}
