use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Map, Value};

use crate::error::Error;

/// Path-style percent encoding for the maps destination: unreserved
/// characters and `/` pass through, spaces become `%20`.
const DESTINATION_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Per-endpoint declaration of required top-level keys and the shapes the
/// validator checks on them. One pipeline, parameterized by one of these,
/// replaces per-endpoint copies of the validation logic.
pub struct FieldSpec {
    pub required: &'static [Field],
    /// Whether event locations under `localContext.eventsSummary` get the
    /// structured-location + maps-link normalization after validation.
    pub normalize_event_locations: bool,
}

pub struct Field {
    pub key: &'static str,
    pub shape: Shape,
}

pub enum Shape {
    /// Presence only.
    Any,
    String,
    Array,
    /// Object that must carry all the named keys.
    Object {
        required_keys: &'static [&'static str],
    },
}

/// Check required top-level keys and their declared shapes. The first
/// violation aborts the request; no partial result survives.
pub fn validate(doc: &Value, spec: &FieldSpec) -> Result<(), Error> {
    let obj = doc
        .as_object()
        .ok_or_else(|| Error::InvalidShape("document".to_string()))?;

    for field in spec.required {
        let value = obj
            .get(field.key)
            .ok_or_else(|| Error::MissingField(field.key.to_string()))?;
        check_shape(field.key, value, &field.shape)?;
    }

    Ok(())
}

fn check_shape(key: &str, value: &Value, shape: &Shape) -> Result<(), Error> {
    match shape {
        Shape::Any => Ok(()),
        Shape::String => {
            if value.is_string() {
                Ok(())
            } else {
                Err(Error::InvalidShape(key.to_string()))
            }
        }
        Shape::Array => {
            if value.is_array() {
                Ok(())
            } else {
                Err(Error::InvalidShape(key.to_string()))
            }
        }
        Shape::Object { required_keys } => {
            let obj = value
                .as_object()
                .ok_or_else(|| Error::InvalidShape(key.to_string()))?;
            for k in *required_keys {
                if !obj.contains_key(*k) {
                    return Err(Error::MissingField(format!("{}.{}", key, k)));
                }
            }
            Ok(())
        }
    }
}

// ── Location normalization ────────────────────────────

/// Models sometimes return an event location as free text ("Austin, TX")
/// instead of the structured shape the prompt asked for. Both normalize to
/// the same object; re-running on normalized output is a no-op.
pub fn normalize_location(value: &Value) -> Value {
    match value {
        Value::String(s) => {
            let (city, state) = match s.split_once(',') {
                Some((city, state)) => (city.trim(), state.trim()),
                None => (s.trim(), ""),
            };
            json!({ "street": "", "city": city, "state": state, "zip": "" })
        }
        Value::Object(_) => value.clone(),
        _ => json!({ "street": "", "city": "", "state": "", "zip": "" }),
    }
}

/// Synthesize a Google Maps directions link from the address parts when the
/// location lacks a non-empty one.
pub fn ensure_maps_link(loc: &mut Map<String, Value>) {
    let present = loc
        .get("mapsLink")
        .and_then(Value::as_str)
        .map(|s| !s.is_empty())
        .unwrap_or(false);
    if present {
        return;
    }

    let part = |key: &str| loc.get(key).and_then(Value::as_str).unwrap_or("");
    let address = format!(
        "{}, {}, {} {}",
        part("street"),
        part("city"),
        part("state"),
        part("zip")
    );

    loc.insert(
        "mapsLink".to_string(),
        Value::String(format!(
            "https://www.google.com/maps/dir/?api=1&destination={}",
            utf8_percent_encode(&address, DESTINATION_SET)
        )),
    );
}

/// Normalize every event location under `localContext.eventsSummary`:
/// coerce free-text locations to the structured shape, then synthesize a
/// maps link where one is absent.
pub fn normalize_event_locations(doc: &mut Value) {
    let events = match doc
        .pointer_mut("/localContext/eventsSummary")
        .and_then(Value::as_array_mut)
    {
        Some(events) => events,
        None => return,
    };

    for event in events {
        let obj = match event.as_object_mut() {
            Some(obj) => obj,
            None => continue,
        };
        let mut location = obj
            .get("location")
            .map(normalize_location)
            .unwrap_or_else(|| json!({ "street": "", "city": "", "state": "", "zip": "" }));
        if let Some(loc) = location.as_object_mut() {
            ensure_maps_link(loc);
        }
        obj.insert("location".to_string(), location);
    }
}
