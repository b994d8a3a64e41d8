//! Coercion of the vendor's legacy scalar encodings into typed values.
//!
//! Every scalar on the XML wire is a string; the same field may carry a
//! boolean as `Y`/`N`, `TRUE`/`FALSE`, or `1`/`0` depending on which screen
//! last wrote it, and an absent value is indistinguishable from the empty
//! string. These helpers are the single place that knows those rules.

use chrono::{DateTime, FixedOffset};

use crate::error::S2NetboxError;

/// Timestamp layouts observed from the vendor when logged in with
/// `dateformat=tzoffset`.
const VENDOR_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%z"];

/// Coerce one of the vendor's boolean spellings into a tri-state value.
///
/// `Y`/`true`/`1` (any case) is true, `N`/`false`/`0` is false, and anything
/// else is `None`. The third state matters: a missing or garbled source value
/// must never be silently read as false.
pub fn coerce_boolean(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "true" | "1" => Some(true),
        "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Coerce a vendor timestamp string.
///
/// The empty string is an unset date. A non-empty string that parses as
/// neither RFC 3339 nor one of the observed vendor layouts is a malformed
/// record, not a `None` — a silently-null date would mask upstream
/// corruption.
pub fn coerce_date(value: &str) -> Result<Option<DateTime<FixedOffset>>, S2NetboxError> {
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(parsed));
    }
    for format in VENDOR_TIMESTAMP_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Ok(Some(parsed));
        }
    }
    Err(S2NetboxError::MalformedRecord(format!(
        "unparseable timestamp: {value:?}"
    )))
}

/// Empty string becomes `None`; any other value passes through unchanged.
pub fn coerce_optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Split a comma-and-space delimited key list (the UDF15 convention).
pub fn coerce_key_list(value: &str) -> Option<Vec<String>> {
    if value.is_empty() {
        return None;
    }
    Some(value.split(", ").map(str::to_string).collect())
}
