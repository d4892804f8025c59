//! Event types and serialization.

use serde::Serialize;
use serde_json::{Map, Value};

/// A single analytics event as sent to the HTTP API.
///
/// Events are plain JSON objects so that fields unknown to this crate can be
/// carried through verbatim. Build them with [`EventBuilder`](crate::EventBuilder).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    pub(crate) fn from_map(fields: Map<String, Value>) -> Self {
        Event(fields)
    }

    /// Look up any field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.str_field("user_id")
    }

    pub fn device_id(&self) -> Option<&str> {
        self.str_field("device_id")
    }

    /// The event type. `None` only if additional data replaced it with a non-string.
    pub fn event_type(&self) -> Option<&str> {
        self.str_field("event_type")
    }

    /// Event time in milliseconds since epoch.
    pub fn time(&self) -> Option<i64> {
        self.0.get("time").and_then(Value::as_i64)
    }

    pub fn insert_id(&self) -> Option<&str> {
        self.str_field("insert_id")
    }

    pub fn platform(&self) -> Option<&str> {
        self.str_field("platform")
    }

    pub fn event_properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("event_properties").and_then(Value::as_object)
    }

    pub fn user_properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("user_properties").and_then(Value::as_object)
    }

    /// Borrow the underlying field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the event, returning its field map.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Delivery options attached to an event package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeliveryOptions {
    /// Minimum length accepted for `user_id` and `device_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_id_length: Option<u32>,
}

impl DeliveryOptions {
    pub fn min_id_length(length: u32) -> Self {
        Self {
            min_id_length: Some(length),
        }
    }

    /// True when no option is set.
    pub fn is_empty(&self) -> bool {
        self.min_id_length.is_none()
    }
}

/// Request body posted to the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPackage {
    pub api_key: String,
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<DeliveryOptions>,
}

impl EventPackage {
    /// True when the package carries no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
