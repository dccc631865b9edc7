use std::path::PathBuf;

use log::{error, info, warn};
use serde_json::Value;

use crate::models::profile::{merge_raw, ProfileDocument};
use crate::store::{KeyValueStore, PROFILE_KEY};

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(u16),
    #[error("could not read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the canonical profile document comes from.
/// A single attempt per call: no retries, no timeout. Any JSON value is
/// accepted; typing happens in the loaders.
#[rocket::async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, FetchError>;

    /// Human readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Canonical document stored next to the site, served as `/profile.json`.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[rocket::async_trait]
impl ProfileSource for FileSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let raw = rocket::tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Canonical document fetched over HTTP, e.g. from version control hosting.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        HttpSource {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[rocket::async_trait]
impl ProfileSource for HttpSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        let raw = resp.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Locally persisted document; empty when absent or corrupt.
pub fn load_local(store: &dyn KeyValueStore) -> ProfileDocument {
    local_overrides(store)
        .map(ProfileDocument::from_value)
        .unwrap_or_default()
}

fn local_overrides(store: &dyn KeyValueStore) -> Option<Value> {
    let raw = store.get(PROFILE_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Stored {} is not valid JSON, ignoring it: {}", PROFILE_KEY, e);
            None
        }
    }
}

/// Document for the public page: the remote copy verbatim, or the local
/// cache when the remote copy cannot be had.
pub struct ProfileLoader<'a> {
    source: &'a dyn ProfileSource,
    local: &'a dyn KeyValueStore,
}

impl<'a> ProfileLoader<'a> {
    pub fn new(source: &'a dyn ProfileSource, local: &'a dyn KeyValueStore) -> Self {
        ProfileLoader { source, local }
    }

    pub async fn resolve(&self) -> ProfileDocument {
        match self.source.fetch().await {
            Ok(raw) => {
                info!("Profile loaded from {}", self.source.describe());
                ProfileDocument::from_value(raw)
            }
            Err(e) => {
                warn!(
                    "Failed to load profile from {}, falling back to local cache: {}",
                    self.source.describe(),
                    e
                );
                load_local(self.local)
            }
        }
    }
}

/// Document for the editor: the remote copy with local overrides on top,
/// key by key. A local `null` wins too.
pub struct SettingsStore<'a> {
    source: &'a dyn ProfileSource,
    local: &'a dyn KeyValueStore,
}

impl<'a> SettingsStore<'a> {
    pub fn new(source: &'a dyn ProfileSource, local: &'a dyn KeyValueStore) -> Self {
        SettingsStore { source, local }
    }

    pub async fn resolve(&self) -> ProfileDocument {
        let remote = match self.source.fetch().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Could not load profile from {}, editing local data only: {}",
                    self.source.describe(),
                    e
                );
                Value::Object(Default::default())
            }
        };

        let merged = match local_overrides(self.local) {
            Some(overrides) => merge_raw(remote, overrides),
            None => remote,
        };
        ProfileDocument::from_value(merged)
    }
}
