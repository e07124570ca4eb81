//! Bearer Token Extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use http::{HeaderMap, header};

/// Authentication scheme prefix (matched case-insensitively)
const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from headers
///
/// Returns `None` when the header is absent, not valid ASCII, uses another
/// scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
