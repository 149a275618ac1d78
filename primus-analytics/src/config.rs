//! Configuration loading and resolution
//!
//! Options come from the `analytics` key of the Primus client options, or
//! from a TOML file for hosts that keep their settings on disk:
//!
//! ```toml
//! [analytics]
//! category = "chat"
//! app = "chat-web"
//!
//! [analytics.events]
//! open = "connected"
//! write = false
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every option is optional. [`TrackingConfig::resolve`] fills in defaults and
//! the result is read-only for the lifetime of the integration.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;

/// Default analytics category and application name
pub const DEFAULT_BUCKET: &str = "primus";

/// Main configuration struct for file-based setups
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics options
    #[serde(default)]
    pub analytics: AnalyticsOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        Self::from_toml_str(&content)
    }
}

/// Caller-supplied analytics options, all optional
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AnalyticsOptions {
    /// Analytics category (bucket) every event is reported under
    #[serde(default)]
    pub category: Option<String>,

    /// Application name used in exception reports
    #[serde(default)]
    pub app: Option<String>,

    /// Per-event renames and suppressions, keyed by canonical event name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: HashMap<String, EventOverride>,
}

/// Treat an explicit `null` events table like a missing one
fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<String, EventOverride>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, EventOverride>>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalyticsOptions {
    /// Read the `analytics` key from a Primus client options object
    ///
    /// A missing, null or `false` key yields the defaults.
    pub fn from_client_options(options: &serde_json::Value) -> Result<Self> {
        match options.get("analytics") {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => {
                Ok(Self::default())
            }
            Some(analytics) => Ok(serde_json::from_value(analytics.clone())?),
        }
    }
}

/// What to do with a tracked event name
///
/// Written as a string (rename) or `false` (suppress). Any other value is
/// rejected when the options are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawOverride")]
pub enum EventOverride {
    /// Report the event under a different action name
    Rename(String),
    /// Never report the event
    Suppress,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOverride {
    Action(String),
    Flag(bool),
}

impl TryFrom<RawOverride> for EventOverride {
    type Error = String;

    fn try_from(raw: RawOverride) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawOverride::Action(action) => Ok(EventOverride::Rename(action)),
            RawOverride::Flag(false) => Ok(EventOverride::Suppress),
            RawOverride::Flag(true) => Err(
                "event override must be an action name or `false`, got `true`".to_string(),
            ),
        }
    }
}

/// Resolved tracking configuration, one per client instance
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    category: String,
    app: String,
    events: HashMap<String, EventOverride>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl TrackingConfig {
    /// Merge caller options with the defaults
    ///
    /// Empty `category` and `app` strings fall back to [`DEFAULT_BUCKET`].
    pub fn resolve(options: Option<AnalyticsOptions>) -> Self {
        let options = options.unwrap_or_default();

        Self {
            category: non_empty_or_default(options.category),
            app: non_empty_or_default(options.app),
            events: options.events,
        }
    }

    /// Analytics category for event hits
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Application name for exception hits
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Resolve the action an event is reported under
    ///
    /// Returns `None` when the event is suppressed. Unmapped names and empty
    /// renames pass through unchanged.
    pub fn action_for<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        match self.events.get(name) {
            Some(EventOverride::Suppress) => None,
            Some(EventOverride::Rename(action)) if !action.is_empty() => Some(action),
            _ => Some(name),
        }
    }

    /// Check whether an event name is suppressed
    pub fn is_suppressed(&self, name: &str) -> bool {
        matches!(self.events.get(name), Some(EventOverride::Suppress))
    }

    /// Number of configured renames and suppressions
    pub fn override_count(&self) -> usize {
        self.events.len()
    }
}

fn non_empty_or_default(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BUCKET.to_string())
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
