use crate::numeric::Numeric;
use serde::{Deserialize, Deserializer, Serialize};

/// Promotion type labels the service understands. The console treats the
/// field as an opaque string; this list only feeds the type drop-down.
pub const PROMOTION_TYPES: [&str; 4] = [
    "AMOUNT_DISCOUNT",
    "PERCENTAGE_DISCOUNT",
    "BXGY",
    "UNKNOWN",
];

/// A Promotion record as exchanged with the service.
///
/// `None` means "not present in the JSON object". Payloads built from the form
/// always fill every field, so absence only happens on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Numeric>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub promotion_type: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Numeric>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub duration: Option<Numeric>,
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, deserialize_with = "strict_bool", skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

// A field that is present but `null` still counts as present.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// Whatever the service sends lands in a text field: `null` as an empty
// string, scalars and containers as their JSON text.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(Some(text))
}

// Only JSON booleans carry a status; "true", 1 and friends do not.
fn strict_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => Ok(Some(b)),
        _ => Ok(None),
    }
}
