use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::errors::ValidationError;
use crate::models::Reading;

/// Fields every sensor payload must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "timestamp", "temp", "pressure", "co_mean", "co_max", "co_valid", "pm2_5", "pm10",
];

/// Turns a raw sensor payload into a typed [`Reading`].
///
/// The first missing field is reported, so a payload with several gaps
/// fails on the earliest one in [`REQUIRED_FIELDS`] order.
pub fn validate_payload(payload: &Value) -> Result<Reading, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| object.get(**field).is_none_or(Value::is_null)) {
        return Err(ValidationError::MissingField(*missing));
    }

    Ok(Reading {
        timestamp: timestamp_field(object, "timestamp")?,
        temp: number_field(object, "temp")?,
        pressure: number_field(object, "pressure")?,
        co_mean: number_field(object, "co_mean")?,
        co_max: number_field(object, "co_max")?,
        co_valid: bool_field(object, "co_valid")?,
        pm2_5: number_field(object, "pm2_5")?,
        pm10: number_field(object, "pm10")?,
    })
}

/// Parses a payload from raw bytes, as delivered by the broker.
pub fn validate_slice(bytes: &[u8]) -> Result<Reading, ValidationError> {
    let payload: Value = serde_json::from_slice(bytes).map_err(|_| ValidationError::NotAnObject)?;
    validate_payload(&payload)
}

fn invalid(field: &'static str, value: &Value) -> ValidationError {
    ValidationError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn number_field(object: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    let raw = &object[field];
    let number = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(field, raw))?;

    if !number.is_finite() {
        return Err(ValidationError::NonFinite(field));
    }

    Ok(number)
}

fn bool_field(object: &Map<String, Value>, field: &'static str) -> Result<bool, ValidationError> {
    let raw = &object[field];
    match raw {
        Value::Bool(flag) => Ok(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(value) => Ok(value != 0),
            None => Err(invalid(field, raw)),
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid(field, raw)),
        },
        _ => Err(invalid(field, raw)),
    }
}

fn timestamp_field(object: &Map<String, Value>, field: &'static str) -> Result<OffsetDateTime, ValidationError> {
    let raw = &object[field];
    let text = raw.as_str().ok_or_else(|| invalid(field, raw))?;
    // Stored as text, so every timestamp is normalised to UTC to keep ordering lexical.
    OffsetDateTime::parse(text.trim(), &Rfc3339)
        .map(|timestamp| timestamp.to_offset(UtcOffset::UTC))
        .map_err(|_| ValidationError::InvalidTimestamp(text.to_string()))
}
