use serde_json::{Map, Value};
use anyhow::{bail, Error, Result};
use unicode_segmentation::UnicodeSegmentation;

/*================================================================================
=                            JSON GETTER METHODS                                 =
================================================================================*/

/// A trait for extracting values from JSON with type conversion
pub trait FromValue: Sized {
    /// Try to convert a JSON value to Self
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Get a value from a JSON config with a default
pub fn get_default<T: FromValue>(config: &Value, key: &str, default: T) -> T {
    match config.get(key) {
        Some(value) => T::from_value(value).unwrap_or(default),
        None => default,
    }
}


/// Walks a dotted path ("lastVersion.data.testCases"). Any non-object hop yields None.
pub fn json_get<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = data;
    for part in key.split('.') {
        match current.get(part) {
            Some(value) => current = value,
            None => return None,
        }
    }
    Some(current)
}


/// Reads an optional text field. Absent reads as "", anything other than a string (null included) is an error.
pub fn optional_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, Error> {
    match obj.get(key) {
        None => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => bail!("field '{}' is not text: {}", key, other),
    }
}

/// Like `optional_str`, but null also reads as "".
pub fn nullable_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a str, Error> {
    match obj.get(key) {
        Some(Value::Null) => Ok(""),
        _ => optional_str(obj, key),
    }
}

/// Raw rendering of a field for messages: the text itself, "" when absent, JSON otherwise
pub fn field_text(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}


/*================================================================================
=                            TEXT HELPERS                                        =
================================================================================*/

/// First `max_len` graphemes of `text`
pub fn truncate_graphemes(text: &str, max_len: usize) -> &str {
    match text.grapheme_indices(true).nth(max_len) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Title used when reporting on a record that is being dropped
pub fn display_title(record: &Value) -> String {
    match record {
        Value::Object(obj) => match obj.get("title") {
            Some(Value::String(title)) => title.clone(),
            Some(other) => other.to_string(),
            None => String::from("Unknown Title"),
        },
        _ => String::from("Malformed Problem Entry"),
    }
}
