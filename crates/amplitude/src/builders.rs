//! Event builder for fluent API.

use crate::types::Event;
use crate::Error;
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Get current timestamp in milliseconds.
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Accept a property value only if it is a JSON object. `null` counts as unset.
fn object_field(name: &str, value: Option<Value>) -> Result<Option<Value>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => Ok(Some(value)),
        Some(_) => Err(Error::validation(format!("{name} must be a JSON object"))),
    }
}

fn insert_property(target: &mut Option<Value>, key: String, value: Value) {
    let target = target.get_or_insert_with(|| Value::Object(Map::new()));
    // A non-object set earlier is left alone so that build() rejects it.
    if let Value::Object(map) = target {
        map.insert(key, value);
    }
}

/// Builder for a single [`Event`].
///
/// `build()` validates the event: it needs a non-empty `event_type` and at
/// least one non-empty identity (`user_id` or `device_id`). Every event gets a
/// fresh `insert_id`, and `time` defaults to now when unset or zero.
///
/// Additional data is merged after all other fields, so it can overwrite any
/// of them, including `time`, `event_type` and `insert_id`. When the same key
/// is added twice, the last value wins.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event_type: String,
    user_id: Option<String>,
    device_id: Option<String>,
    event_properties: Option<Value>,
    user_properties: Option<Value>,
    time: Option<i64>,
    platform: Option<String>,
    additional: Map<String, Value>,
}

impl EventBuilder {
    /// Start an event of the given type.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            user_id: None,
            device_id: None,
            event_properties: None,
            user_properties: None,
            time: None,
            platform: None,
            additional: Map::new(),
        }
    }

    /// Set user_id (required unless device_id is set).
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set device_id (required unless user_id is set).
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Replace all event properties. Must be a JSON object.
    pub fn event_properties(mut self, properties: impl Into<Value>) -> Self {
        self.event_properties = Some(properties.into());
        self
    }

    /// Add a single event property.
    pub fn event_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        insert_property(&mut self.event_properties, key.into(), value.into());
        self
    }

    /// Replace all user properties. Must be a JSON object.
    pub fn user_properties(mut self, properties: impl Into<Value>) -> Self {
        self.user_properties = Some(properties.into());
        self
    }

    /// Add a single user property.
    pub fn user_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        insert_property(&mut self.user_properties, key.into(), value.into());
        self
    }

    /// Set event time (milliseconds since epoch).
    pub fn time(mut self, time_ms: i64) -> Self {
        self.time = Some(time_ms);
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Add one extra top-level field.
    pub fn additional(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    /// Add extra top-level fields, in iteration order.
    pub fn additional_data<I, K, V>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in data {
            self.additional.insert(key.into(), value.into());
        }
        self
    }

    /// Validate and build the event.
    pub fn build(self) -> Result<Event, Error> {
        let user_id = self.user_id.filter(|id| !id.is_empty());
        let device_id = self.device_id.filter(|id| !id.is_empty());
        if user_id.is_none() && device_id.is_none() {
            return Err(Error::validation("specify either user_id or device_id"));
        }

        if self.event_type.is_empty() {
            return Err(Error::validation("specify event_type"));
        }

        let event_properties = object_field("event_properties", self.event_properties)?;
        let user_properties = object_field("user_properties", self.user_properties)?;

        let mut fields = Map::new();
        if let Some(user_id) = user_id {
            fields.insert("user_id".into(), Value::String(user_id));
        }
        if let Some(device_id) = device_id {
            fields.insert("device_id".into(), Value::String(device_id));
        }
        fields.insert("event_type".into(), Value::String(self.event_type));

        let time = self.time.filter(|&t| t != 0).unwrap_or_else(now_ms);
        fields.insert("time".into(), Value::from(time));

        if let Some(properties) = event_properties {
            fields.insert("event_properties".into(), properties);
        }
        if let Some(properties) = user_properties {
            fields.insert("user_properties".into(), properties);
        }
        if let Some(platform) = self.platform {
            fields.insert("platform".into(), Value::String(platform));
        }
        fields.insert(
            "insert_id".into(),
            Value::String(Uuid::new_v4().to_string()),
        );

        // Additional data goes last; colliding keys overwrite.
        fields.extend(self.additional);

        Ok(Event::from_map(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_with_user_id() {
        let event = EventBuilder::new("login")
            .user_id("usr_123")
            .event_property("plan", "pro")
            .user_property("cohort", "A")
            .platform("server")
            .time(1706400000000)
            .build()
            .unwrap();

        assert_eq!(event.user_id(), Some("usr_123"));
        assert_eq!(event.device_id(), None);
        assert_eq!(event.event_type(), Some("login"));
        assert_eq!(event.time(), Some(1706400000000));
        assert_eq!(event.platform(), Some("server"));
        assert_eq!(event.event_properties().unwrap()["plan"], "pro");
        assert_eq!(event.user_properties().unwrap()["cohort"], "A");
        assert!(!event.insert_id().unwrap().is_empty());
    }

    #[test]
    fn test_build_with_device_id_only() {
        let event = EventBuilder::new("open")
            .device_id("dev_abc")
            .build()
            .unwrap();

        assert_eq!(event.device_id(), Some("dev_abc"));
        assert!(event.get("user_id").is_none());
        assert!(event.get("event_properties").is_none());
        assert!(event.get("platform").is_none());
    }

    #[test]
    fn test_missing_identity_fails() {
        let result = EventBuilder::new("login").build();
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = EventBuilder::new("login").user_id("").device_id("").build();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_event_type_fails() {
        let result = EventBuilder::new("").user_id("usr_123").build();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_non_object_properties_fail() {
        let result = EventBuilder::new("login")
            .user_id("usr_123")
            .event_properties(json!(["not", "a", "map"]))
            .build();
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = EventBuilder::new("login")
            .user_id("usr_123")
            .user_properties("cohort A")
            .build();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_property_added_after_non_object_still_fails() {
        let result = EventBuilder::new("login")
            .user_id("usr_123")
            .event_properties(42)
            .event_property("plan", "pro")
            .build();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_null_properties_are_omitted() {
        let event = EventBuilder::new("login")
            .user_id("usr_123")
            .user_properties(Value::Null)
            .build()
            .unwrap();

        assert!(event.get("user_properties").is_none());
    }

    #[test]
    fn test_time_defaults_to_now() {
        let before = now_ms();
        let event = EventBuilder::new("login").user_id("usr_123").build().unwrap();
        let after = now_ms();

        let time = event.time().unwrap();
        assert!(time >= before && time <= after);
    }

    #[test]
    fn test_zero_time_defaults_to_now() {
        let event = EventBuilder::new("login")
            .user_id("usr_123")
            .time(0)
            .build()
            .unwrap();

        assert!(event.time().unwrap() > 0);
    }

    #[test]
    fn test_insert_id_unique_per_build() {
        let builder = EventBuilder::new("login").user_id("usr_123").time(1706400000000);

        let first = builder.clone().build().unwrap();
        let second = builder.build().unwrap();

        assert_ne!(first.insert_id(), second.insert_id());

        let mut a = first.into_fields();
        let mut b = second.into_fields();
        a.remove("insert_id");
        b.remove("insert_id");
        assert_eq!(a, b);
    }

    #[test]
    fn test_additional_data_overwrites() {
        let event = EventBuilder::new("login")
            .user_id("usr_123")
            .time(1706400000000)
            .additional_data([("event_type", json!("override")), ("time", json!(1))])
            .additional("country", "United States")
            .build()
            .unwrap();

        assert_eq!(event.event_type(), Some("override"));
        assert_eq!(event.time(), Some(1));
        assert_eq!(event.get("country").unwrap(), "United States");
    }

    #[test]
    fn test_additional_last_write_wins() {
        let event = EventBuilder::new("login")
            .user_id("usr_123")
            .additional("ip", "127.0.0.1")
            .additional("ip", "10.0.0.1")
            .build()
            .unwrap();

        assert_eq!(event.get("ip").unwrap(), "10.0.0.1");
    }
}
