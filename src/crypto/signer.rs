//! HMAC request signing.

use crate::TelesignError;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;
type HmacSha1 = Hmac<Sha1>;

/// Digest algorithm used to sign a request.
///
/// The name is sent in `x-ts-auth-method` so the service can pick the
/// matching verification path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// HMAC over SHA-256.
    #[default]
    HmacSha256,
    /// HMAC over SHA-1.
    HmacSha1,
}

impl AuthMethod {
    /// Value of the `x-ts-auth-method` header.
    pub fn header_value(self) -> &'static str {
        match self {
            Self::HmacSha256 => "HMAC-SHA256",
            Self::HmacSha1 => "HMAC-SHA1",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_value())
    }
}

impl FromStr for AuthMethod {
    type Err = TelesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HMAC-SHA256" => Ok(Self::HmacSha256),
            "HMAC-SHA1" => Ok(Self::HmacSha1),
            other => Err(TelesignError::ConfigError(format!(
                "Unsupported auth method: {}",
                other
            ))),
        }
    }
}

/// Decode a base64-encoded secret key.
pub fn decode_secret_key(secret_key_b64: &str) -> Result<Vec<u8>, TelesignError> {
    let bytes = STANDARD
        .decode(secret_key_b64.trim())
        .map_err(|e| TelesignError::ConfigError(format!("Invalid secret key base64: {}", e)))?;

    if bytes.is_empty() {
        return Err(TelesignError::ConfigError(
            "secret_key cannot be empty".to_string(),
        ));
    }

    Ok(bytes)
}

/// Compute the HMAC of `canonical_string` with raw key bytes, base64-encoded.
pub fn sign_with_key(
    key: &[u8],
    canonical_string: &str,
    method: AuthMethod,
) -> Result<String, TelesignError> {
    let digest = match method {
        AuthMethod::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(key)
                .map_err(|e| TelesignError::ConfigError(format!("Invalid HMAC key: {}", e)))?;
            mac.update(canonical_string.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        AuthMethod::HmacSha1 => {
            let mut mac = HmacSha1::new_from_slice(key)
                .map_err(|e| TelesignError::ConfigError(format!("Invalid HMAC key: {}", e)))?;
            mac.update(canonical_string.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(STANDARD.encode(digest))
}

/// Sign a canonical string with a base64-encoded secret key.
///
/// # Errors
/// * `ConfigError` - The secret key is not valid standard base64
pub fn sign(
    secret_key_b64: &str,
    canonical_string: &str,
    method: AuthMethod,
) -> Result<String, TelesignError> {
    let key = decode_secret_key(secret_key_b64)?;
    sign_with_key(&key, canonical_string, method)
}
