// ABOUTME: Decoding of engine return values into host types
// ABOUTME: Decode failures surface as bridge call errors naming the method

use acebridge_types::{Position, Range};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BridgeError, Result};

pub(crate) fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|error| BridgeError::call(method, error))
}

pub(crate) fn decode_position(method: &str, value: &Value) -> Result<Position> {
    Position::from_remote(value).map_err(|error| BridgeError::call(method, error))
}

/// Engines return `null`/`undefined` for "no range"
pub(crate) fn decode_optional_range(method: &str, value: &Value) -> Result<Option<Range>> {
    if value.is_null() {
        return Ok(None);
    }
    Range::from_remote(value)
        .map(Some)
        .map_err(|error| BridgeError::call(method, error))
}

pub(crate) fn decode_range(method: &str, value: &Value) -> Result<Range> {
    Range::from_remote(value).map_err(|error| BridgeError::call(method, error))
}

/// Counts come back as JSON numbers, sometimes floating point
pub(crate) fn decode_count(method: &str, value: &Value) -> Result<u32> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| BridgeError::call(method, format!("invalid count {n}"))),
        other => Err(BridgeError::call(method, format!("expected a count, got {other}"))),
    }
}
