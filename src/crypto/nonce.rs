//! Per-request nonce and timestamp generation (replay protection).
//!
//! Both values must be generated fresh for every signed request.

use crate::clock::Clock;
use crate::TelesignError;
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use uuid::Builder;

/// Wire format of `x-ts-date`, e.g. `Wed, 02 Oct 2024 12:34:56 GMT`.
pub const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Generate a random UUID nonce from the operating system RNG.
pub fn generate_nonce() -> String {
    generate_nonce_with(&mut OsRng)
}

/// Generate a random UUID nonce from the given cryptographic RNG.
///
/// Returns the 36-character hyphenated form.
pub fn generate_nonce_with<R: RngCore + CryptoRng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}

/// Format an instant in the `x-ts-date` wire format.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an `x-ts-date` value back into a UTC instant.
///
/// Accepts any RFC 2822 date; the weekday must match the date.
pub fn parse_timestamp(date: &str) -> Result<DateTime<Utc>, TelesignError> {
    DateTime::parse_from_rfc2822(date.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| TelesignError::InputError(format!("Invalid x-ts-date {:?}: {}", date, e)))
}

/// Current time from `clock` in the `x-ts-date` wire format.
pub fn generate_timestamp<C: Clock + ?Sized>(clock: &C) -> String {
    clock.x_ts_date()
}
