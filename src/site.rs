use std::path::PathBuf;

use crate::loader::{ProfileLoader, ProfileSource, SettingsStore};
use crate::store::KeyValueStore;

/// Shared state behind every route.
pub struct Site {
    pub local: Box<dyn KeyValueStore>,
    pub source: Box<dyn ProfileSource>,
    /// Canonical document served at `/profile.json`.
    pub profile_path: PathBuf,
}

impl Site {
    pub fn loader(&self) -> ProfileLoader<'_> {
        ProfileLoader::new(self.source.as_ref(), self.local.as_ref())
    }

    pub fn settings_store(&self) -> SettingsStore<'_> {
        SettingsStore::new(self.source.as_ref(), self.local.as_ref())
    }
}
