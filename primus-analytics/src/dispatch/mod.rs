//! Client event dispatch
//!
//! Binds to a Primus client's lifecycle events and its outgoing transform
//! hook, and turns each occurrence into a tracked event:
//!
//! | client event          | tracked as                                  |
//! |-----------------------|---------------------------------------------|
//! | `open`                | `open`, ends any reconnect burst            |
//! | `close`               | `close`                                     |
//! | `online`              | `online`                                    |
//! | `reconnect scheduled` | `reconnect-start`, once per burst           |
//! | `reconnected`         | `reconnected`                               |
//! | `reconnect failed`    | `reconnect-failed`                          |
//! | `error`               | exception hit with the error message        |
//! | outgoing message      | emitted event name, or `write`              |
//!
//! Everything runs synchronously on the client's event loop.

mod outgoing;
mod reconnect;

pub use outgoing::{event_name, matched_shape, Packet, EMITTER_EVENT_TYPE, WRITE_EVENT};
pub use reconnect::ReconnectGuard;

use std::fmt;
use std::rc::Rc;

use crate::collector::CollectorHandle;
use crate::config::{AnalyticsOptions, TrackingConfig};
use crate::tracker::{Tracker, Verdict};

/// Error reported by the client; always fatal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    /// Human-readable message
    pub message: String,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&dyn std::error::Error> for ClientError {
    fn from(err: &dyn std::error::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Lifecycle events raised by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Open,
    Close,
    Online,
    Reconnected,
    ReconnectScheduled,
    ReconnectFailed,
    Error(ClientError),
}

impl ClientEvent {
    /// Event name as the client emits it
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Open => "open",
            ClientEvent::Close => "close",
            ClientEvent::Online => "online",
            ClientEvent::Reconnected => "reconnected",
            ClientEvent::ReconnectScheduled => "reconnect scheduled",
            ClientEvent::ReconnectFailed => "reconnect failed",
            ClientEvent::Error(_) => "error",
        }
    }

    /// Canonical name the event is tracked under
    ///
    /// `None` for errors, which are reported as exception hits.
    pub fn tracked_name(&self) -> Option<&'static str> {
        match self {
            ClientEvent::Open => Some("open"),
            ClientEvent::Close => Some("close"),
            ClientEvent::Online => Some("online"),
            ClientEvent::Reconnected => Some("reconnected"),
            ClientEvent::ReconnectScheduled => Some("reconnect-start"),
            ClientEvent::ReconnectFailed => Some("reconnect-failed"),
            ClientEvent::Error(_) => None,
        }
    }
}

/// Handler registered for lifecycle events
pub type EventHandler = Box<dyn FnMut(&ClientEvent)>;

/// Transform registered for outgoing messages; may inspect, never alter
pub type OutgoingTransform = Box<dyn FnMut(&Packet)>;

/// The parts of a Primus client the integration hooks into
pub trait MessagingClient {
    /// Register a handler called for every lifecycle event
    fn on_event(&mut self, handler: EventHandler);

    /// Register a transform called once per outgoing message, before it is sent
    fn on_outgoing(&mut self, transform: OutgoingTransform);
}

/// Per-client dispatcher owning the tracker and reconnect state
#[derive(Debug)]
pub struct Dispatcher {
    tracker: Tracker,
    reconnect: ReconnectGuard,
}

impl Dispatcher {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            reconnect: ReconnectGuard::new(),
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Whether a reconnect burst has been reported and not yet ended by `open`
    pub fn reconnect_in_flight(&self) -> bool {
        self.reconnect.in_flight()
    }

    /// Track a lifecycle event
    pub fn handle_event(&self, event: &ClientEvent) {
        tracing::trace!(event = %event.name(), "Client event");

        if let ClientEvent::Error(err) = event {
            self.tracker.track_exception(&err.message);
            return;
        }

        let name = match event.tracked_name() {
            Some(name) => name,
            None => return,
        };

        match event {
            // Guard resets before the hit is sent; nothing observes the order
            ClientEvent::Open => self.tracker.track_with(name, || {
                self.reconnect.opened();
                Verdict::Record(None)
            }),
            ClientEvent::ReconnectScheduled => {
                self.tracker.track_with(name, || self.reconnect.scheduled())
            }
            _ => self.tracker.track(name, None),
        }
    }

    /// Track an outgoing message under its emitted event name
    pub fn handle_outgoing(&self, packet: &Packet) {
        tracing::trace!(
            shape = matched_shape(&packet.data).unwrap_or("plain"),
            "Outgoing message"
        );
        self.tracker.track(event_name(&packet.data), None);
    }
}

/// Attach analytics tracking to a client
///
/// Resolves the options, builds the dispatcher and registers it with the
/// client. The returned dispatcher is shared with the registered handlers.
pub fn attach<C>(
    client: &mut C,
    options: Option<AnalyticsOptions>,
    collector: CollectorHandle,
) -> Rc<Dispatcher>
where
    C: MessagingClient + ?Sized,
{
    let config = TrackingConfig::resolve(options);

    tracing::debug!(
        category = %config.category(),
        app = %config.app(),
        overrides = config.override_count(),
        "Attaching analytics to client"
    );

    let dispatcher = Rc::new(Dispatcher::new(Tracker::new(config, collector)));

    let events = Rc::clone(&dispatcher);
    client.on_event(Box::new(move |event: &ClientEvent| events.handle_event(event)));

    let outgoing = Rc::clone(&dispatcher);
    client.on_outgoing(Box::new(move |packet: &Packet| outgoing.handle_outgoing(packet)));

    dispatcher
}
