//! Pure conversions from UI values to wire values.

use url::Url;

use crate::error::ClientError;

pub const DEFAULT_LIFETIME_DAYS: i64 = 30;
pub const DEFAULT_CODE_LENGTH: u32 = 6;
pub const FOREVER: &str = "forever";

/// Reads an optional sign and the leading decimal digits, skipping leading
/// whitespace. Anything after the digits is ignored, so `"7days"` is 7.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// `"forever"` maps to `None` (unbounded); numbers to their value; anything
/// else to the 30 day default.
pub fn transform_lifetime(choice: &str) -> Option<i64> {
    if choice == FOREVER {
        return None;
    }
    Some(parse_leading_int(choice).unwrap_or(DEFAULT_LIFETIME_DAYS))
}

/// Non-positive or unparseable lengths fall back to 6.
pub fn transform_length(raw: &str) -> u32 {
    parse_leading_int(raw)
        .filter(|len| *len > 0)
        .and_then(|len| u32::try_from(len).ok())
        .unwrap_or(DEFAULT_CODE_LENGTH)
}

/// Returns the last non-empty path segment of an absolute URL.
///
/// `https://turl.co/abc123` and `http://localhost:8010/d/abc123` both yield
/// `abc123`.
pub fn extract_code(short_url: &str) -> Result<String, ClientError> {
    let invalid = || ClientError::InvalidUrlFormat(short_url.to_string());

    let trimmed = short_url.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    let code = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).last())
        .ok_or_else(invalid)?;

    Ok(code.to_string())
}

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod tests;
