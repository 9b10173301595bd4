//! Numeric one-time verification codes.

use crate::TelesignError;
use rand::{rngs::OsRng, CryptoRng, Rng, RngCore};

/// Generate a `length`-digit code from the operating system RNG.
///
/// # Errors
/// * `InputError` - `length` is zero
pub fn generate_code(length: usize) -> Result<String, TelesignError> {
    generate_code_with(&mut OsRng, length)
}

/// Generate a `length`-digit code from the given cryptographic RNG.
///
/// Each digit is drawn uniformly and independently; leading zeros are kept.
pub fn generate_code_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    length: usize,
) -> Result<String, TelesignError> {
    if length == 0 {
        return Err(TelesignError::InputError(
            "verification code length must be positive".to_string(),
        ));
    }

    Ok((0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect())
}
