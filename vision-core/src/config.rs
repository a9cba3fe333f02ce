//! Gateway configuration
//!
//! The browser build has no process environment, so the endpoint and public
//! key are baked in at compile time. Tests and tooling use the JSON form.

use reqwest::Url;
use serde::Deserialize;

use crate::error::{GatewayError, GatewayResult};

/// Bucket holding task attachments
pub const DEFAULT_IMAGE_BUCKET: &str = "task-images";

/// Connection settings for the hosted gateway
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    url: Url,
    anon_key: String,
    image_bucket: String,
}

#[derive(Deserialize)]
struct RawConfig {
    url: String,
    anon_key: String,
    #[serde(default)]
    image_bucket: Option<String>,
}

impl GatewayConfig {
    pub fn new(url: &str, anon_key: &str) -> GatewayResult<Self> {
        let mut parsed = Url::parse(url.trim())
            .map_err(|e| GatewayError::Config(format!("invalid url {:?}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::Config(format!("unsupported scheme {:?}", parsed.scheme())));
        }
        if anon_key.trim().is_empty() {
            return Err(GatewayError::Config("anon key is empty".to_string()));
        }
        // Url::join drops the last segment unless the base ends with '/'
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self {
            url: parsed,
            anon_key: anon_key.trim().to_string(),
            image_bucket: DEFAULT_IMAGE_BUCKET.to_string(),
        })
    }

    pub fn with_image_bucket(mut self, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        if !bucket.trim().is_empty() {
            self.image_bucket = bucket.trim().to_string();
        }
        self
    }

    pub fn from_json(json: &str) -> GatewayResult<Self> {
        let raw: RawConfig = serde_json::from_str(json)
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        let config = Self::new(&raw.url, &raw.anon_key)?;
        Ok(match raw.image_bucket {
            Some(bucket) => config.with_image_bucket(bucket),
            None => config,
        })
    }

    /// Values captured from the build environment
    pub fn from_build_env() -> GatewayResult<Self> {
        let url = option_env!("VISION_NEST_SUPABASE_URL")
            .ok_or_else(|| GatewayError::Config("VISION_NEST_SUPABASE_URL was not set at build time".to_string()))?;
        let key = option_env!("VISION_NEST_SUPABASE_ANON_KEY")
            .ok_or_else(|| GatewayError::Config("VISION_NEST_SUPABASE_ANON_KEY was not set at build time".to_string()))?;
        let config = Self::new(url, key)?;
        Ok(match option_env!("VISION_NEST_IMAGE_BUCKET") {
            Some(bucket) => config.with_image_bucket(bucket),
            None => config,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn image_bucket(&self) -> &str {
        &self.image_bucket
    }

    /// Join a service path such as `rest/v1/tasks` onto the base URL
    pub fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        self.url
            .join(path.trim_start_matches('/'))
            .map_err(|e| GatewayError::Config(format!("invalid endpoint {:?}: {}", path, e)))
    }
}
