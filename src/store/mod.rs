pub mod cookie;
pub mod memory;
pub mod sqlite;

pub use cookie::CookieStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

// ── Keys ────────────────────────────────────────────────────────────

/// Serialized `ProfileDocument` holding the local overrides.
pub const PROFILE_KEY: &str = "profileData";
/// Integer string 0–100, kept per visitor.
pub const VOLUME_KEY: &str = "audioVolume";
/// Plaintext shared secret override for the settings gate.
pub const PASSWORD_KEY: &str = "adminPassword";
/// Session-scoped sentinel, `"true"` once the gate has been passed.
pub const SESSION_KEY: &str = "settingsAuthenticated";

/// Flat string key/value persistence.
/// Implementations: `SqliteStore` (durable, survives restarts),
/// `MemoryStore` (process lifetime) and `CookieStore` (per visitor).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}
