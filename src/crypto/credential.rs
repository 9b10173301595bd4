//! Customer credential holding the decoded signing key.

use crate::crypto::signer::{decode_secret_key, sign_with_key, AuthMethod};
use crate::TelesignError;
use std::fmt;

/// Customer ID plus decoded secret key.
///
/// Immutable once built; share it by reference across threads. The secret
/// never appears in `Debug` output.
#[derive(Clone)]
pub struct Credential {
    customer_id: String,
    secret_key: Vec<u8>,
}

impl Credential {
    /// Build a credential from a customer ID and a base64-encoded secret key.
    ///
    /// # Errors
    /// * `ConfigError` - Empty customer ID or secret key that is not valid base64
    pub fn new(customer_id: &str, secret_key_b64: &str) -> Result<Self, TelesignError> {
        if customer_id.trim().is_empty() {
            return Err(TelesignError::ConfigError(
                "customer_id cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            customer_id: customer_id.to_string(),
            secret_key: decode_secret_key(secret_key_b64)?,
        })
    }

    /// The customer ID.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Sign a canonical string with this credential's key.
    pub fn sign(&self, canonical_string: &str, method: AuthMethod) -> Result<String, TelesignError> {
        sign_with_key(&self.secret_key, canonical_string, method)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("customer_id", &self.customer_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
