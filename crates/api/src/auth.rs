//! Admin PIN gate for write-protected endpoints.

use axum::http::HeaderMap;
use barkeep_core::DomainError;

/// Header carrying the shared-secret PIN.
pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

/// Exact-match check of the PIN header against the configured secret.
///
/// A missing or unreadable header fails the same way as a wrong PIN.
pub fn require_admin_pin(headers: &HeaderMap, expected: &str) -> Result<(), DomainError> {
    let supplied = headers
        .get(ADMIN_PIN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if supplied == expected {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
