//! Signing pipeline composing the request-authentication steps.
//!
//! 1. Validate method and resource path
//! 2. Serialize the body (POST/PUT) and hash it with MD5
//! 3. Build the canonical string
//! 4. Sign it with the credential
//! 5. Assemble the authentication headers

use crate::clock::Clock;
use crate::crypto::{
    credential::Credential,
    digest::{content_md5, FORM_CONTENT_TYPE},
    headers::{build_headers, AuthHeaders},
    nonce::{generate_nonce_with, generate_timestamp},
    signer::AuthMethod,
    signing::build_canonical_string,
};
use crate::protocol::request::{Fields, Method};
use crate::TelesignError;
use rand::{CryptoRng, RngCore};

/// A request ready to be sent.
///
/// `body` holds the exact bytes hashed into `Content-MD5`; send them
/// unchanged and do not alter `headers`.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Resource path (leading slash, no query string).
    pub resource_path: String,
    /// Query parameters for GET/DELETE; empty for body-bearing methods.
    pub query: Fields,
    /// Url-encoded body for POST/PUT.
    pub body: Option<Vec<u8>>,
    /// Authentication headers.
    pub headers: AuthHeaders,
}

/// Path bytes the URL parser passes through unchanged (RFC 3986 `pchar` and `/`).
fn is_path_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@/%".contains(&b)
}

/// Check that a resource path is absolute, carries no query string and
/// reaches the wire byte-for-byte as signed.
///
/// Fragments, whitespace, non-ASCII bytes, malformed percent escapes and
/// dot segments are rejected because the URL parser would rewrite them.
pub fn validate_resource_path(resource_path: &str) -> Result<(), TelesignError> {
    if resource_path.is_empty() {
        return Err(TelesignError::InputError(
            "resource path cannot be empty".to_string(),
        ));
    }
    if !resource_path.starts_with('/') {
        return Err(TelesignError::InputError(format!(
            "resource path must start with '/': {}",
            resource_path
        )));
    }
    if resource_path.contains('?') {
        return Err(TelesignError::InputError(format!(
            "resource path must not include a query string: {}",
            resource_path
        )));
    }

    let bytes = resource_path.as_bytes();
    if let Some(pos) = bytes.iter().position(|&b| !is_path_byte(b)) {
        return Err(TelesignError::InputError(format!(
            "resource path has a character that is not sent verbatim at byte {}: {:?}",
            pos, resource_path
        )));
    }
    for (i, _) in resource_path.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !matches!(escape, Some([h, l]) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()) {
            return Err(TelesignError::InputError(format!(
                "resource path has a malformed percent escape: {}",
                resource_path
            )));
        }
    }

    let has_dot_segment = resource_path.split('/').any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    });
    if has_dot_segment {
        return Err(TelesignError::InputError(format!(
            "resource path must not contain '.' or '..' segments: {}",
            resource_path
        )));
    }
    Ok(())
}

/// Sign a request with an explicit timestamp and nonce.
///
/// Identical inputs yield identical headers.
pub fn sign_request(
    credential: &Credential,
    method: Method,
    resource_path: &str,
    fields: Fields,
    auth_method: AuthMethod,
    timestamp: &str,
    nonce: &str,
) -> Result<SignedRequest, TelesignError> {
    validate_resource_path(resource_path)?;

    let (query, body, content_type, md5) = if method.has_body() {
        let body = fields.to_form_body().into_bytes();
        let md5 = content_md5(&body);
        (Fields::new(), Some(body), Some(FORM_CONTENT_TYPE), Some(md5))
    } else {
        (fields, None, None, None)
    };

    let canonical = build_canonical_string(
        method.as_str(),
        resource_path,
        content_type.unwrap_or(""),
        md5.as_deref().unwrap_or(""),
        timestamp,
        nonce,
    );

    let signature = credential.sign(&canonical, auth_method)?;

    let headers = build_headers(
        credential.customer_id(),
        &signature,
        nonce,
        timestamp,
        auth_method,
        content_type,
        md5.as_deref(),
    );

    Ok(SignedRequest {
        method,
        resource_path: resource_path.to_string(),
        query,
        body,
        headers,
    })
}

/// Sign a request with a fresh nonce and the current time.
pub fn prepare_request<C, R>(
    credential: &Credential,
    method: Method,
    resource_path: &str,
    fields: Fields,
    auth_method: AuthMethod,
    clock: &C,
    rng: &mut R,
) -> Result<SignedRequest, TelesignError>
where
    C: Clock + ?Sized,
    R: RngCore + CryptoRng,
{
    let nonce = generate_nonce_with(rng);
    let timestamp = generate_timestamp(clock);
    sign_request(
        credential,
        method,
        resource_path,
        fields,
        auth_method,
        &timestamp,
        &nonce,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use rand::{rngs::StdRng, SeedableRng};

    fn credential() -> Credential {
        Credential::new("CUST1", "dGVzdGtleQ==").unwrap()
    }

    fn sms_fields() -> Fields {
        [("phone_number", "1555"), ("language", "en")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_get_request_known_signature() {
        let signed = sign_request(
            &credential(),
            Method::Get,
            "/v1/verify/abc123",
            Fields::new(),
            AuthMethod::HmacSha256,
            "T1",
            "n1",
        )
        .unwrap();

        assert_eq!(
            signed.headers.authorization,
            "TSA CUST1:BpQsOxVVM7dVYIC/VSbm3cvY/zfufCvhSzVRQTeuyy8="
        );
        assert!(signed.body.is_none());
        assert!(signed.headers.content_md5.is_none());
    }

    #[test]
    fn test_get_fields_become_query() {
        let mut fields = Fields::new();
        fields.set("verify_code", "1234");
        let signed = sign_request(
            &credential(),
            Method::Get,
            "/v1/verify/abc123",
            fields,
            AuthMethod::HmacSha256,
            "T1",
            "n1",
        )
        .unwrap();

        assert_eq!(signed.query.get("verify_code"), Some("1234"));
        // Query parameters are not part of the signature
        assert_eq!(
            signed.headers.authorization,
            "TSA CUST1:BpQsOxVVM7dVYIC/VSbm3cvY/zfufCvhSzVRQTeuyy8="
        );
    }

    #[test]
    fn test_post_request_known_signature() {
        let signed = sign_request(
            &credential(),
            Method::Post,
            "/v1/verify/sms",
            sms_fields(),
            AuthMethod::HmacSha256,
            "Wed, 02 Oct 2024 12:34:56 GMT",
            "0f8fad5b-d9cb-469f-a165-70867728950e",
        )
        .unwrap();

        assert_eq!(signed.body.as_deref(), Some(&b"phone_number=1555&language=en"[..]));
        assert_eq!(
            signed.headers.content_md5.as_deref(),
            Some("lusD5E1mfKKKnWw3kPVVlA==")
        );
        assert_eq!(
            signed.headers.content_type.as_deref(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            signed.headers.authorization,
            "TSA CUST1:xNQ7B/HZeAFULl99rT0DUaLY1UXXoM796BRki5H2gT8="
        );
        assert!(signed.query.is_empty());
    }

    #[test]
    fn test_body_change_changes_signature() {
        let a = sign_request(
            &credential(),
            Method::Post,
            "/v1/verify/sms",
            sms_fields(),
            AuthMethod::HmacSha256,
            "T1",
            "n1",
        )
        .unwrap();

        let mut fields = sms_fields();
        fields.set("phone_number", "1556");
        let b = sign_request(
            &credential(),
            Method::Post,
            "/v1/verify/sms",
            fields,
            AuthMethod::HmacSha256,
            "T1",
            "n1",
        )
        .unwrap();

        assert_ne!(a.headers.content_md5, b.headers.content_md5);
        assert_ne!(a.headers.authorization, b.headers.authorization);
    }

    #[test]
    fn test_resource_path_validation() {
        assert!(validate_resource_path("/v1/verify/sms").is_ok());
        for bad in ["", "v1/verify", "/v1/verify?x=1"] {
            assert!(matches!(
                validate_resource_path(bad),
                Err(TelesignError::InputError(_))
            ));
        }
    }

    #[test]
    fn test_resource_path_allows_reserved_and_escaped() {
        for good in [
            "/v1/phoneid/15555551234",
            "/v1/phoneid/%2B1555",
            "/v1/verify/ref-1_a.b~c",
            "/v1/a:b@c;d=e,f",
            "/v1/.well-known/x",
        ] {
            assert!(validate_resource_path(good).is_ok(), "{}", good);
        }
    }

    #[test]
    fn test_resource_path_rejects_rewritten_characters() {
        for bad in [
            "/v1/phoneid/1555#x",
            "/v1/verify/a b",
            "/v1/verify/a\tb",
            "/v1/verify/a\nb",
            "/v1/verify/a\u{0}b",
            "/v1/verify/caf\u{e9}",
            "/v1/verify\\sms",
            "/v1/verify/\"x\"",
            "/v1/verify/<x>",
            "/v1/verify/a|b",
        ] {
            assert!(
                matches!(validate_resource_path(bad), Err(TelesignError::InputError(_))),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_resource_path_rejects_malformed_escapes() {
        for bad in ["/v1/verify/%", "/v1/verify/%2", "/v1/verify/%zz", "/v1/%g1/x"] {
            assert!(validate_resource_path(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_resource_path_rejects_dot_segments() {
        for bad in [
            "/v1/../v2",
            "/v1/./verify",
            "/v1/verify/..",
            "/v1/%2e%2e/admin",
            "/v1/%2E/x",
            "/v1/.%2e/x",
        ] {
            assert!(validate_resource_path(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_sign_request_rejects_fragment_path() {
        let result = sign_request(
            &credential(),
            Method::Get,
            "/v1/phoneid/1555#x",
            Fields::new(),
            AuthMethod::HmacSha256,
            "T1",
            "n1",
        );
        assert!(matches!(result, Err(TelesignError::InputError(_))));
    }

    #[test]
    fn test_prepare_request_fresh_nonce() {
        let clock = FixedClock::from_x_ts_date("Wed, 02 Oct 2024 12:34:56 GMT").unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let a = prepare_request(
            &credential(),
            Method::Get,
            "/v1/verify/abc123",
            Fields::new(),
            AuthMethod::HmacSha256,
            &clock,
            &mut rng,
        )
        .unwrap();
        let b = prepare_request(
            &credential(),
            Method::Get,
            "/v1/verify/abc123",
            Fields::new(),
            AuthMethod::HmacSha256,
            &clock,
            &mut rng,
        )
        .unwrap();

        assert_eq!(a.headers.date, "Wed, 02 Oct 2024 12:34:56 GMT");
        assert_ne!(a.headers.nonce, b.headers.nonce);
        assert_ne!(a.headers.authorization, b.headers.authorization);
    }
}
