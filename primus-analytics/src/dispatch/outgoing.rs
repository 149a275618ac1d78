//! Outbound message naming
//!
//! Two emitter plugins tag application messages with an event name:
//!
//! - `primus-emit`: `{ "emit": ["name", ...args] }`
//! - `primus-emitter`: `{ "type": 0, "data": ["name", ...args] }`
//!
//! Shapes are tried in that order. Anything else is a plain `write`.

use serde_json::Value;

/// Event name for writes that carry no recognizable name
pub const WRITE_EVENT: &str = "write";

/// `type` discriminator of a `primus-emitter` event packet
pub const EMITTER_EVENT_TYPE: f64 = 0.0;

/// An outgoing message as seen by the transform hook
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    /// The message's own data
    pub data: Value,
}

impl Packet {
    pub fn new(data: Value) -> Self {
        Self { data }
    }
}

type ShapeMatcher = fn(&Value) -> Option<&str>;

/// Known named-message shapes, in match order
const SHAPES: &[(&str, ShapeMatcher)] = &[
    ("primus-emit", emit_event_name),
    ("primus-emitter", emitter_event_name),
];

/// Derive the tracked event name for an outgoing message
pub fn event_name(data: &Value) -> &str {
    SHAPES
        .iter()
        .find_map(|(_, matcher)| matcher(data))
        .unwrap_or(WRITE_EVENT)
}

/// Name of the first shape that matches, if any
pub fn matched_shape(data: &Value) -> Option<&'static str> {
    SHAPES
        .iter()
        .find(|(_, matcher)| matcher(data).is_some())
        .map(|(shape, _)| *shape)
}

fn emit_event_name(data: &Value) -> Option<&str> {
    leading_string(data.get("emit"))
}

fn emitter_event_name(data: &Value) -> Option<&str> {
    if data.get("type")?.as_f64()? != EMITTER_EVENT_TYPE {
        return None;
    }
    leading_string(data.get("data"))
}

/// First element of an array, when it is a string
fn leading_string(value: Option<&Value>) -> Option<&str> {
    value?.as_array()?.first()?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primus_emit_shape() {
        let data = json!({ "emit": ["foo", "bar"] });
        assert_eq!(event_name(&data), "foo");
        assert_eq!(matched_shape(&data), Some("primus-emit"));
    }

    #[test]
    fn test_primus_emitter_shape() {
        let data = json!({ "type": 0, "data": ["foo", "bar"] });
        assert_eq!(event_name(&data), "foo");
        assert_eq!(matched_shape(&data), Some("primus-emitter"));

        let float_type = json!({ "type": 0.0, "data": ["foo"] });
        assert_eq!(event_name(&float_type), "foo");
    }

    #[test]
    fn test_emit_checked_before_emitter() {
        let data = json!({ "emit": ["first"], "type": 0, "data": ["second"] });
        assert_eq!(event_name(&data), "first");
    }

    #[test]
    fn test_falls_through_to_emitter() {
        // emit present but not named
        let data = json!({ "emit": [1, 2], "type": 0, "data": ["second"] });
        assert_eq!(event_name(&data), "second");
    }

    #[test]
    fn test_plain_writes() {
        let cases = [
            json!("foo"),
            json!(null),
            json!(42),
            json!(["foo"]),
            json!({}),
            json!({ "emit": [] }),
            json!({ "emit": "foo" }),
            json!({ "emit": [{ "name": "foo" }] }),
            json!({ "type": 1, "data": ["foo"] }),
            json!({ "type": "0", "data": ["foo"] }),
            json!({ "type": 0 }),
            json!({ "type": 0, "data": [] }),
            json!({ "type": 0, "data": "foo" }),
        ];
        for data in cases {
            assert_eq!(event_name(&data), WRITE_EVENT, "data: {}", data);
            assert_eq!(matched_shape(&data), None);
        }
    }
}
