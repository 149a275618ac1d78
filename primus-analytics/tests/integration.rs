//! Integration tests for the analytics integration
//!
//! A fake in-memory client stands in for Primus: it records the handlers the
//! integration registers and replays lifecycle events and writes through them.

use primus_analytics::dispatch::{EventHandler, MessagingClient, OutgoingTransform};
use primus_analytics::{
    attach, AnalyticsOptions, ClientError, ClientEvent, Collector, CollectorHandle, Hit, Packet,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Collector that records the argument list of every call
#[derive(Clone, Default)]
struct Ga {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl Ga {
    fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.lock().unwrap().clone()
    }

    /// Event payloads only, ignoring exception hits
    fn events(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|args| args.len() == 2)
            .map(|mut args| args.remove(1))
            .collect()
    }

    fn actions(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|payload| payload["eventAction"].as_str())
            .map(str::to_string)
            .collect()
    }
}

impl Collector for Ga {
    fn call(&self, hit: Hit<'_>) {
        self.calls.lock().unwrap().push(hit.to_args());
    }
}

/// Minimal stand-in for a Primus client
#[derive(Default)]
struct FakeClient {
    handlers: Vec<EventHandler>,
    transforms: Vec<OutgoingTransform>,
    sent: Vec<Value>,
}

impl FakeClient {
    fn emit(&mut self, event: ClientEvent) {
        for handler in self.handlers.iter_mut() {
            handler(&event);
        }
    }

    fn write(&mut self, data: Value) {
        let packet = Packet::new(data);
        for transform in self.transforms.iter_mut() {
            transform(&packet);
        }
        self.sent.push(packet.data);
    }
}

impl MessagingClient for FakeClient {
    fn on_event(&mut self, handler: EventHandler) {
        self.handlers.push(handler);
    }

    fn on_outgoing(&mut self, transform: OutgoingTransform) {
        self.transforms.push(transform);
    }
}

fn setup(client_options: Value) -> (FakeClient, Ga) {
    let ga = Ga::default();
    let mut client = FakeClient::default();
    let options = AnalyticsOptions::from_client_options(&client_options).unwrap();
    attach(&mut client, Some(options), CollectorHandle::with(ga.clone()));
    (client, ga)
}

fn event_payload(action: &str, category: &str) -> Value {
    json!({
        "eventAction": action,
        "eventCategory": category,
        "hitType": "event",
        "nonInteraction": 1
    })
}

// ============================================
// Lifecycle
// ============================================

#[test]
fn test_open_and_close() {
    let (mut client, ga) = setup(json!({ "strategy": false }));

    client.emit(ClientEvent::Open);
    client.emit(ClientEvent::Close);

    assert_eq!(
        ga.calls(),
        vec![
            vec![json!("send"), event_payload("open", "primus")],
            vec![json!("send"), event_payload("close", "primus")],
        ]
    );
}

#[test]
fn test_online_is_tracked() {
    let (mut client, ga) = setup(json!({}));
    client.emit(ClientEvent::Online);
    assert_eq!(ga.actions(), vec!["online"]);
}

#[test]
fn test_custom_category_and_renames() {
    let (mut client, ga) = setup(json!({
        "analytics": {
            "category": "foo",
            "events": { "open": "bar", "close": "bar" }
        }
    }));

    client.emit(ClientEvent::Open);
    client.emit(ClientEvent::Close);

    assert_eq!(
        ga.events(),
        vec![event_payload("bar", "foo"), event_payload("bar", "foo")]
    );
}

#[test]
fn test_suppressed_events() {
    let (mut client, ga) = setup(json!({
        "analytics": { "events": { "close": false, "write": false } }
    }));

    client.emit(ClientEvent::Open);
    client.write(json!("foo"));
    client.emit(ClientEvent::Close);

    assert_eq!(ga.actions(), vec!["open"]);
}

// ============================================
// Reconnection
// ============================================

#[test]
fn test_reconnect_burst_reports_once() {
    let (mut client, ga) = setup(json!({}));

    client.emit(ClientEvent::Open);
    client.emit(ClientEvent::ReconnectScheduled);
    client.emit(ClientEvent::ReconnectScheduled);
    client.emit(ClientEvent::ReconnectScheduled);
    client.emit(ClientEvent::Reconnected);

    assert_eq!(ga.actions(), vec!["open", "reconnect-start", "reconnected"]);
}

#[test]
fn test_failed_reconnect() {
    let (mut client, ga) = setup(json!({}));

    client.emit(ClientEvent::Open);
    client.emit(ClientEvent::ReconnectScheduled);
    client.emit(ClientEvent::ReconnectScheduled);
    client.emit(ClientEvent::ReconnectFailed);
    client.emit(ClientEvent::ReconnectScheduled);

    assert_eq!(
        ga.actions(),
        vec!["open", "reconnect-start", "reconnect-failed"]
    );
}

#[test]
fn test_new_burst_after_open() {
    let (mut client, ga) = setup(json!({}));

    client.emit(ClientEvent::Open);
    client.emit(ClientEvent::ReconnectScheduled);
    client.emit(ClientEvent::Reconnected);
    client.emit(ClientEvent::Open);
    client.emit(ClientEvent::ReconnectScheduled);

    assert_eq!(
        ga.actions(),
        vec!["open", "reconnect-start", "reconnected", "open", "reconnect-start"]
    );
}

#[test]
fn test_clients_do_not_share_state() {
    let (mut first, first_ga) = setup(json!({}));
    let (mut second, second_ga) = setup(json!({}));

    first.emit(ClientEvent::ReconnectScheduled);
    second.emit(ClientEvent::ReconnectScheduled);

    assert_eq!(first_ga.actions(), vec!["reconnect-start"]);
    assert_eq!(second_ga.actions(), vec!["reconnect-start"]);
}

// ============================================
// Errors
// ============================================

#[test]
fn test_error_reports_exception() {
    let (mut client, ga) = setup(json!({
        "analytics": { "events": { "close": false } }
    }));

    client.emit(ClientEvent::Error(ClientError::new(
        "connect ECONNREFUSED 127.0.0.1:1024",
    )));

    let calls = ga.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0], "send");
    assert_eq!(calls[0][1], "exception");
    assert!(calls[0][2]["exDescription"]
        .as_str()
        .unwrap()
        .contains("ECONNREFUSED"));
    assert_eq!(calls[0][2]["appName"], "primus");
    assert_eq!(calls[0][2]["exFatal"], true);
}

#[test]
fn test_error_suppressed() {
    let (mut client, ga) = setup(json!({
        "analytics": { "events": { "error": false } }
    }));

    client.emit(ClientEvent::Error(ClientError::new("connect ECONNREFUSED")));
    assert!(ga.calls().is_empty());
}

#[test]
fn test_error_uses_app_name() {
    let (mut client, ga) = setup(json!({ "analytics": { "app": "chat-web" } }));
    client.emit(ClientEvent::Error(ClientError::new("boom")));
    assert_eq!(ga.calls()[0][2]["appName"], "chat-web");
}

// ============================================
// Outgoing messages
// ============================================

#[test]
fn test_plain_write() {
    let (mut client, ga) = setup(json!({}));

    client.emit(ClientEvent::Open);
    client.write(json!("foo"));

    assert_eq!(ga.events()[1], event_payload("write", "primus"));
}

#[test]
fn test_primus_emit_write() {
    let (mut client, ga) = setup(json!({}));
    client.write(json!({ "emit": ["foo", "bar"] }));
    assert_eq!(ga.events(), vec![event_payload("foo", "primus")]);
}

#[test]
fn test_primus_emitter_write() {
    let (mut client, ga) = setup(json!({}));
    client.write(json!({ "type": 0, "data": ["foo", "bar"] }));
    assert_eq!(ga.events(), vec![event_payload("foo", "primus")]);
}

#[test]
fn test_writes_pass_through_unchanged() {
    let (mut client, ga) = setup(json!({
        "analytics": { "events": { "foo": false } }
    }));
    let messages = vec![
        json!("plain"),
        json!({ "emit": ["foo", "bar"] }),
        json!({ "type": 0, "data": ["baz"] }),
    ];

    for message in messages.clone() {
        client.write(message);
    }

    assert_eq!(client.sent, messages);
    assert_eq!(ga.actions(), vec!["write", "baz"]);
}

// ============================================
// Collector availability
// ============================================

#[test]
fn test_missing_collector_is_silent() {
    let mut client = FakeClient::default();
    let collector = CollectorHandle::new();
    let dispatcher = attach(&mut client, None, collector.clone());

    client.emit(ClientEvent::Open);
    client.emit(ClientEvent::ReconnectScheduled);
    client.emit(ClientEvent::Error(ClientError::new("boom")));
    client.write(json!("foo"));

    // The guard still advances without a collector
    assert!(dispatcher.reconnect_in_flight());
    assert_eq!(client.sent.len(), 1);

    // A collector installed later is picked up
    let ga = Ga::default();
    collector.install(ga.clone());
    client.emit(ClientEvent::Close);
    assert_eq!(ga.actions(), vec!["close"]);

    collector.clear();
    client.emit(ClientEvent::Open);
    assert_eq!(ga.calls().len(), 1);
}
