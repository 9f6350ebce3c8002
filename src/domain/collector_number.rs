use crate::error::SyncError;
use regex::Regex;
use std::sync::LazyLock;

const COLLECTOR_NUMBER_RE: &str = r"^([^0-9]*)([0-9]*)([^0-9]*)$";

static COLLECTOR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COLLECTOR_NUMBER_RE).expect("Invalid regex"));

/// Pads the numeric part of a collector number to three digits while
/// retaining the non-numeric prefix and suffix, so that collector numbers
/// of a set sort numerically when compared as strings.
///
/// `"T3p"` becomes `"T003p"`, `"TCH7"` becomes `"CH007"` (the `TCH` prefix
/// is a known historical typo for `CH`).
pub fn normalize(raw: &str) -> Result<String, SyncError> {
    let caps = COLLECTOR_NUMBER
        .captures(raw)
        .ok_or_else(|| SyncError::InvalidCollectorNumber(raw.to_string()))?;

    let prefix = match caps.get(1).map_or("", |m| m.as_str()) {
        "TCH" => "CH",
        prefix => prefix,
    };
    let number = caps.get(2).map_or("", |m| m.as_str());
    if number.is_empty() {
        return Err(SyncError::InvalidCollectorNumber(raw.to_string()));
    }
    let number: u64 = number
        .parse()
        .map_err(|_| SyncError::InvalidCollectorNumber(raw.to_string()))?;
    let suffix = caps.get(3).map_or("", |m| m.as_str());

    Ok(format!("{prefix}{number:03}{suffix}"))
}
