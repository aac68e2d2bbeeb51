use std::path::{Path, PathBuf};
use std::time::Duration;

use kadoc_core::api_paths::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the stored API base URL.
pub const API_URL_ENV: &str = "KADOC_API_URL";

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KadocConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_url: String,
    #[serde(default)]
    pub locale: Locale,
    /// Search quiet period in milliseconds. Added in v1.
    pub debounce_ms: u64,
}

impl Default for KadocConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_url: DEFAULT_API_URL.to_string(),
            locale: Locale::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl KadocConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// API base URL: command-line flag, then `KADOC_API_URL`, then the
    /// stored value.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        self.resolve_api_url_with(flag, std::env::var(API_URL_ENV).ok())
    }

    pub fn resolve_api_url_with(&self, flag: Option<&str>, env: Option<String>) -> String {
        flag.map(str::to_string)
            .or(env)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.api_url.clone())
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("kadoc"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<KadocConfig> {
    load_config_from(&config_path()?)
}

/// The stored config, or defaults when none has been saved yet.
pub fn load_or_default() -> eyre::Result<KadocConfig> {
    if has_config() {
        load_config()
    } else {
        Ok(KadocConfig::default())
    }
}

pub fn load_config_from(path: &Path) -> eyre::Result<KadocConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version") {
        None => 0,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| eyre::eyre!("invalid config_version {v} in {}", path.display()))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: KadocConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update kadoc."
        ));
    }

    // v0 → v1: add debounce_ms
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("debounce_ms")
            .or_insert(serde_json::Value::Number(DEFAULT_DEBOUNCE_MS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added debounce_ms)");
    }

    Ok(json)
}

pub fn save_config(config: &KadocConfig) -> eyre::Result<PathBuf> {
    save_config_to(&config_dir()?, config)
}

/// Write `config.json` into `dir`, creating it if needed. Returns the path
/// written.
pub fn save_config_to(dir: &Path, config: &KadocConfig) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}
