//! Hit payloads handed to the collector
//!
//! Field names follow the analytics.js event and exception hit fields.

use serde::Serialize;

/// Command word for every collector call
pub const SEND_COMMAND: &str = "send";

/// Hit type marker for exception calls
pub const EXCEPTION_HIT: &str = "exception";

/// Hit type of an event payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitType {
    Event,
}

/// Generic event hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPayload {
    /// Resolved action name
    pub event_action: String,

    /// Configured category
    pub event_category: String,

    /// Always [`HitType::Event`]
    pub hit_type: HitType,

    /// Always 1: these events are not caused by user interaction and must not
    /// affect the bounce rate
    pub non_interaction: u8,

    /// Optional numeric value, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_value: Option<u64>,
}

impl AnalyticsPayload {
    /// Build an event hit
    ///
    /// A zero value counts as no value.
    pub fn new(action: &str, category: &str, value: Option<u64>) -> Self {
        Self {
            event_action: action.to_string(),
            event_category: category.to_string(),
            hit_type: HitType::Event,
            non_interaction: 1,
            event_value: value.filter(|v| *v != 0),
        }
    }
}

/// Exception hit for fatal client errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionPayload {
    /// Error message reported by the client
    pub ex_description: String,

    /// Configured application name
    pub app_name: String,

    /// Client errors are always fatal
    pub ex_fatal: bool,
}

impl ExceptionPayload {
    pub fn new(description: &str, app: &str) -> Self {
        Self {
            ex_description: description.to_string(),
            app_name: app.to_string(),
            ex_fatal: true,
        }
    }
}

/// A single collector call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit<'a> {
    /// `collector("send", payload)`
    Event(&'a AnalyticsPayload),
    /// `collector("send", "exception", payload)`
    Exception(&'a ExceptionPayload),
}

impl Hit<'_> {
    /// Command word of the call
    pub fn command(&self) -> &'static str {
        SEND_COMMAND
    }

    /// Render the full argument list of the call
    ///
    /// Useful for hosts that bridge to a JavaScript `ga` function.
    pub fn to_args(&self) -> Vec<serde_json::Value> {
        let command = serde_json::Value::String(self.command().to_string());
        match self {
            Hit::Event(payload) => vec![command, to_value(payload)],
            Hit::Exception(payload) => vec![
                command,
                serde_json::Value::String(EXCEPTION_HIT.to_string()),
                to_value(payload),
            ],
        }
    }
}

/// Serialize a payload; these structs only hold strings and integers
fn to_value<T: Serialize>(payload: &T) -> serde_json::Value {
    serde_json::to_value(payload).unwrap_or(serde_json::Value::Null)
}
