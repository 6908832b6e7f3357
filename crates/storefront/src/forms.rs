//! Lenient parsing for query and form fields.
//!
//! Browsers send whatever is in an input box, including nothing. Fields
//! marked with [`lenient`] read a value that does not parse as if it were
//! absent, so the handler falls back instead of rejecting the request.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Deserialize an optional field, mapping empty or unparsable text to `None`.
///
/// Use with `#[serde(default, deserialize_with = "lenient")]`.
///
/// # Errors
///
/// Only fails when the field is not text at all.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}
