//! Analytics collector integration
//!
//! The collector is the host-provided reporting function (`ga` on a web
//! page). It is optional and may show up at any point after setup, so the
//! tracker never holds it directly. It goes through a [`CollectorHandle`]
//! that is checked on every call.
//!
//! ## Usage
//!
//! ```rust
//! use primus_analytics::collector::{CollectorHandle, Hit};
//!
//! let collector = CollectorHandle::new();
//! assert!(!collector.is_available());
//!
//! collector.install(|hit: Hit<'_>| {
//!     println!("{}", serde_json::Value::Array(hit.to_args()));
//! });
//! assert!(collector.is_available());
//! ```

mod handle;
mod payload;

pub use handle::{Collector, CollectorHandle};
pub use payload::{AnalyticsPayload, ExceptionPayload, Hit, HitType};
