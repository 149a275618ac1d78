//! Event tracker
//!
//! Turns a tracked event name into a collector call. Two independent checks
//! gate every call: the event must not be suppressed by configuration, and a
//! collector must be installed. Failing either is a silent no-op.

use crate::collector::{AnalyticsPayload, CollectorHandle, ExceptionPayload, Hit};
use crate::config::TrackingConfig;

/// Event name checked for suppression of exception hits
pub const ERROR_EVENT: &str = "error";

/// Outcome of a per-occurrence check run before tracking
///
/// Skipping one occurrence is unrelated to suppressing an event name in the
/// configuration: a skipped occurrence never consults the config at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Drop this occurrence
    Skip,
    /// Track this occurrence with an optional value
    Record(Option<u64>),
}

/// Builds analytics hits and hands them to the collector
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackingConfig,
    collector: CollectorHandle,
}

impl Tracker {
    pub fn new(config: TrackingConfig, collector: CollectorHandle) -> Self {
        Self { config, collector }
    }

    /// Resolved configuration
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Collector handle, for installing a collector after setup
    pub fn collector(&self) -> &CollectorHandle {
        &self.collector
    }

    /// Track an event by canonical name
    ///
    /// The name is renamed or suppressed according to the configuration. A
    /// zero value is dropped from the payload.
    pub fn track(&self, name: &str, value: Option<u64>) {
        let action = match self.config.action_for(name) {
            Some(action) => action,
            None => {
                tracing::debug!(event = %name, "Analytics event suppressed by configuration");
                return;
            }
        };

        let collector = match self.collector.current() {
            Some(collector) => collector,
            None => return,
        };

        let payload = AnalyticsPayload::new(action, self.config.category(), value);
        tracing::trace!(
            event = %name,
            action = %payload.event_action,
            category = %payload.event_category,
            "Sending analytics event"
        );
        collector.call(Hit::Event(&payload));
    }

    /// Run `check` and track the event unless it returns [`Verdict::Skip`]
    pub fn track_with<F>(&self, name: &str, check: F)
    where
        F: FnOnce() -> Verdict,
    {
        match check() {
            Verdict::Skip => {
                tracing::trace!(event = %name, "Analytics occurrence skipped");
            }
            Verdict::Record(value) => self.track(name, value),
        }
    }

    /// Report a fatal client error as an exception hit
    ///
    /// Suppressed when the `error` event is mapped to `false`. A rename of
    /// `error` has no effect here.
    pub fn track_exception(&self, message: &str) {
        let collector = match self.collector.current() {
            Some(collector) => collector,
            None => return,
        };

        if self.config.is_suppressed(ERROR_EVENT) {
            tracing::debug!(event = ERROR_EVENT, "Analytics exception suppressed by configuration");
            return;
        }

        let payload = ExceptionPayload::new(message, self.config.app());
        tracing::trace!(app = %payload.app_name, "Sending analytics exception");
        collector.call(Hit::Exception(&payload));
    }
}
