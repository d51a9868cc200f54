//! Device configuration (`config.json`).
//!
//! ```json
//! {
//!   "device_type": "android",
//!   "android": { "platformName": "Android", "automationName": "UiAutomator2" },
//!   "ios": { "platformName": "iOS", "automationName": "XCUITest" }
//! }
//! ```
//!
//! `device_type` selects both the capability branch used to open a session and
//! the `<platform>_locator` key the locator store resolves against.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::result::{AppError, AppResult};

/// Platform used when the config carries no `device_type`
pub const DEFAULT_PLATFORM: &str = "android";

/// Appium server used when the config carries no `server_url`
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4723";

/// Default config file name
pub const CONFIG_FILE: &str = "config.json";

/// Read a JSON file into `T`, classifying failures as configuration errors.
///
/// A missing file maps to [`AppError::ConfigNotFound`], malformed content to
/// [`AppError::ConfigParse`]. Neither is retried.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AppError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AppError::Io(e)
        }
    })?;
    serde_json::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parsed `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Active platform key, lower-cased on load
    #[serde(default = "default_platform")]
    pub device_type: String,
    /// Appium server base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Capability maps keyed by platform name
    #[serde(flatten)]
    pub platforms: BTreeMap<String, Value>,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_type: default_platform(),
            server_url: None,
            platforms: BTreeMap::new(),
        }
    }
}

impl DeviceConfig {
    /// Create a config for the given platform with no capabilities
    #[must_use]
    pub fn new(device_type: impl Into<String>) -> Self {
        Self {
            device_type: device_type.into().to_lowercase(),
            ..Self::default()
        }
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let mut config: Self = load_json_file(path.as_ref())?;
        config.device_type = config.device_type.to_lowercase();
        Ok(config)
    }

    /// Set the capability map for a platform
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>, caps: Map<String, Value>) -> Self {
        let _ = self
            .platforms
            .insert(platform.into().to_lowercase(), Value::Object(caps));
        self
    }

    /// Set the Appium server URL
    #[must_use]
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Active platform key
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.device_type
    }

    /// Effective server URL
    #[must_use]
    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Capabilities of the active platform, empty when the branch is absent
    #[must_use]
    pub fn capabilities(&self) -> Map<String, Value> {
        match self.platforms.get(&self.device_type) {
            Some(Value::Object(caps)) => caps.clone(),
            _ => Map::new(),
        }
    }

    /// Capabilities with `app` set when an application path is given
    #[must_use]
    pub fn session_capabilities(&self, app_path: Option<&str>) -> Map<String, Value> {
        let mut caps = self.capabilities();
        if let Some(app) = app_path {
            let _ = caps.insert("app".to_string(), Value::String(app.to_string()));
        }
        caps
    }

    /// Write the config back as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Resolve the active platform from a config file.
///
/// Falls back to [`DEFAULT_PLATFORM`] when the file is missing or unreadable.
#[must_use]
pub fn resolve_platform(path: impl AsRef<Path>) -> String {
    match DeviceConfig::from_file(path.as_ref()) {
        Ok(config) => config.device_type,
        Err(e) => {
            tracing::debug!(error = %e, "falling back to default platform");
            default_platform()
        }
    }
}
