//! Background-removal proxy for artist imagery.
//!
//! Wraps a single third-party endpoint that takes an image URL and returns the
//! URL of a copy with its background removed. Several API keys can be
//! configured; they are tried in order until one succeeds. Successful results
//! are remembered for the lifetime of the process. Failures are not cached,
//! and the caller always gets a usable URL back: the original one when
//! nothing worked.

use std::{collections::HashMap, sync::Arc};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    info,
    types::BackgroundRemovalResponse,
    warning,
};

#[derive(Debug, Clone)]
pub struct BackgroundRemovalSettings {
    pub api_keys: Vec<String>,
    pub api_url: String,
    pub api_host: String,
}

impl BackgroundRemovalSettings {
    pub fn from_env() -> Self {
        Self {
            api_keys: config::bg_removal_api_keys(),
            api_url: config::bg_removal_api_url(),
            api_host: config::bg_removal_api_host(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundRemovalService {
    settings: Arc<BackgroundRemovalSettings>,
    http: Client,
    cache: Arc<Mutex<HashMap<String, String>>>,
}

impl BackgroundRemovalService {
    pub fn new(settings: BackgroundRemovalSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            http: Client::new(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn from_env() -> Self {
        Self::new(BackgroundRemovalSettings::from_env())
    }

    pub fn is_enabled(&self) -> bool {
        !self.settings.api_keys.is_empty()
    }

    /// Returns the URL of `image_url` with its background removed, or
    /// `image_url` itself when no key produced a result.
    pub async fn remove_background(&self, image_url: &str) -> String {
        if let Some(cached) = self.cache.lock().await.get(image_url) {
            return cached.clone();
        }

        if !self.is_enabled() {
            return image_url.to_string();
        }

        info!("Removing background from {}", image_url);
        for (idx, api_key) in self.settings.api_keys.iter().enumerate() {
            match self.request(image_url, api_key).await {
                Ok(processed) => {
                    self.cache
                        .lock()
                        .await
                        .insert(image_url.to_string(), processed.clone());
                    return processed;
                }
                Err(e) => warning!("Background removal with key #{} failed: {}", idx + 1, e),
            }
        }

        warning!("Image {} could not be processed", image_url);
        image_url.to_string()
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn request(&self, image_url: &str, api_key: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.settings.api_url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.settings.api_host)
            .form(&[
                ("image_url", image_url),
                ("output_format", "url"),
                ("to_remove", "background"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body: BackgroundRemovalResponse = response.json().await?;
        if let Some(err) = body.error.filter(|e| !e.is_empty()) {
            return Err(Error::Upstream(err));
        }

        body.response
            .and_then(|r| r.image_url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Upstream("response carried no image_url".to_string()))
    }
}
