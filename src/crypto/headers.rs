//! Authentication header assembly.

use crate::crypto::signer::AuthMethod;

/// Authorization scheme prefix.
pub const AUTH_SCHEME: &str = "TSA";

/// Header carrying the signed timestamp.
pub const DATE_HEADER: &str = "x-ts-date";

/// Header carrying the signed nonce.
pub const NONCE_HEADER: &str = "x-ts-nonce";

/// Header naming the signing digest.
pub const AUTH_METHOD_HEADER: &str = "x-ts-auth-method";

/// Headers the service uses to verify a signed request.
///
/// `content_type` and `content_md5` are set only for body-bearing requests
/// and always equal the values folded into the canonical string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `TSA <customer_id>:<signature>`.
    pub authorization: String,
    /// `x-ts-date` value.
    pub date: String,
    /// `x-ts-nonce` value.
    pub nonce: String,
    /// `x-ts-auth-method` value.
    pub auth_method: AuthMethod,
    /// `Content-Type` value.
    pub content_type: Option<String>,
    /// `Content-MD5` value.
    pub content_md5: Option<String>,
}

impl AuthHeaders {
    /// Header name/value pairs in send order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("Authorization", self.authorization.as_str()),
            (DATE_HEADER, self.date.as_str()),
            (NONCE_HEADER, self.nonce.as_str()),
            (AUTH_METHOD_HEADER, self.auth_method.header_value()),
        ];

        if let Some(content_type) = &self.content_type {
            pairs.push(("Content-Type", content_type.as_str()));
        }
        if let Some(content_md5) = &self.content_md5 {
            pairs.push(("Content-MD5", content_md5.as_str()));
        }

        pairs
    }

    /// Look up a header value by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs()
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

/// Assemble the authentication headers for a signed request.
pub fn build_headers(
    customer_id: &str,
    signature: &str,
    nonce: &str,
    timestamp: &str,
    auth_method: AuthMethod,
    content_type: Option<&str>,
    content_md5: Option<&str>,
) -> AuthHeaders {
    AuthHeaders {
        authorization: format!("{} {}:{}", AUTH_SCHEME, customer_id, signature),
        date: timestamp.to_string(),
        nonce: nonce.to_string(),
        auth_method,
        content_type: content_type.map(String::from),
        content_md5: content_md5.map(String::from),
    }
}
