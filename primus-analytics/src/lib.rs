//! # primus-analytics
//!
//! Reports the behavior of a Primus real-time client to an analytics
//! collector (Google Analytics style `ga("send", ...)` calls).
//!
//! This library provides:
//! - Option parsing and defaults, including per-event renames and suppression
//! - An event tracker that builds event and exception hits
//! - A dispatcher that hooks into client lifecycle events and outgoing writes
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows one way and only in reaction to the client:
//! - **Client event:** lifecycle event or outgoing message
//! - **Dispatch:** derives the canonical event name
//! - **Tracker:** applies renames and suppression, calls the collector if one
//!   is installed
//!
//! ## Example
//!
//! ```rust
//! use primus_analytics::{attach, AnalyticsOptions, ClientEvent, CollectorHandle, Hit};
//! use primus_analytics::dispatch::{EventHandler, MessagingClient, OutgoingTransform};
//!
//! #[derive(Default)]
//! struct Client {
//!     handlers: Vec<EventHandler>,
//! }
//!
//! impl MessagingClient for Client {
//!     fn on_event(&mut self, handler: EventHandler) {
//!         self.handlers.push(handler);
//!     }
//!
//!     fn on_outgoing(&mut self, _transform: OutgoingTransform) {}
//! }
//!
//! let options = AnalyticsOptions::from_client_options(&serde_json::json!({
//!     "analytics": { "category": "chat" }
//! }))
//! .expect("valid options");
//!
//! let collector = CollectorHandle::with(|hit: Hit<'_>| {
//!     println!("{}", serde_json::Value::Array(hit.to_args()));
//! });
//!
//! let mut client = Client::default();
//! attach(&mut client, Some(options), collector);
//!
//! for handler in client.handlers.iter_mut() {
//!     handler(&ClientEvent::Open);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use collector::{AnalyticsPayload, Collector, CollectorHandle, ExceptionPayload, Hit};
pub use config::{AnalyticsOptions, Config, EventOverride, TrackingConfig};
pub use dispatch::{attach, ClientError, ClientEvent, Dispatcher, MessagingClient, Packet};
pub use error::{Error, Result};
pub use tracker::{Tracker, Verdict};

// Public modules
pub mod collector;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod tracker;
