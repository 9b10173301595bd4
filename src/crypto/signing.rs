//! Canonical string construction for TeleSign request signing.
//!
//! The string to sign is six newline-separated lines:
//! ```text
//! POST
//! <Content-MD5>
//! application/x-www-form-urlencoded
//! Wed, 02 Oct 2024 12:34:56 GMT
//! x-ts-nonce:<nonce>
//! /v1/verify/sms
//! ```
//! For requests without a body the second and third lines are empty but
//! still present.

use tracing::debug;

/// Build the canonical string for request signing.
///
/// # Arguments
/// * `method` - HTTP method (upper-cased here)
/// * `resource_path` - Request path with leading slash, no query string
/// * `content_type` - Content-Type header value, empty without a body
/// * `content_md5` - Content-MD5 header value, empty without a body
/// * `timestamp` - Value sent in `x-ts-date`
/// * `nonce` - Value sent in `x-ts-nonce`
///
/// # Returns
/// The string the HMAC is computed over.
pub fn build_canonical_string(
    method: &str,
    resource_path: &str,
    content_type: &str,
    content_md5: &str,
    timestamp: &str,
    nonce: &str,
) -> String {
    let method = method.to_uppercase();
    debug!(method = %method, resource = %resource_path, "building canonical string");

    // No trailing newline
    format!(
        "{}\n{}\n{}\n{}\nx-ts-nonce:{}\n{}",
        method, content_md5, content_type, timestamp, nonce, resource_path
    )
}
