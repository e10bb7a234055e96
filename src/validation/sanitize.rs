//! Whitespace normalisation of incoming request bodies

use serde_json::Value;

/// Trim leading and trailing whitespace from every top-level string field.
///
/// Non-string fields, non-object bodies and empty objects are returned as
/// they are.
#[must_use]
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, field)| match field {
                    Value::String(text) => {
                        let trimmed = text.trim();
                        if trimmed.len() == text.len() {
                            (key, Value::String(text))
                        } else {
                            (key, Value::String(trimmed.to_string()))
                        }
                    }
                    other => (key, other),
                })
                .collect(),
        ),
        other => other,
    }
}
