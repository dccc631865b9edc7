use serde::Deserialize;

use crate::loader::{FileSource, HttpSource, ProfileSource};

/// Application settings read from `Rocket.toml` / `ROCKET_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    /// When set, the canonical document is fetched from here instead of disk.
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_profile_path() -> String {
    "website/profile.json".to_string()
}

fn default_db_path() -> String {
    "website/db/linkbio.db".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profile_path: default_profile_path(),
            profile_url: None,
            db_path: default_db_path(),
        }
    }
}

impl AppConfig {
    pub fn profile_source(&self) -> Box<dyn ProfileSource> {
        match self.profile_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => Box::new(HttpSource::new(url.trim())),
            None => Box::new(FileSource::new(&self.profile_path)),
        }
    }
}
