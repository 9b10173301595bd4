//! Content-MD5 computation for request bodies.

use base64::{engine::general_purpose::STANDARD, Engine};
use md5::{Digest, Md5};

/// Content type used for every body-bearing request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Compute the MD5 digest of body and return base64-encoded result.
///
/// The bytes passed here must be the exact bytes put on the wire.
pub fn content_md5(body: &[u8]) -> String {
    let hash = Md5::digest(body);
    STANDARD.encode(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_empty_body() {
        assert_eq!(content_md5(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_md5_form_body() {
        let digest = content_md5(b"phone_number=1555&language=en");
        assert_eq!(digest, "lusD5E1mfKKKnWw3kPVVlA==");
    }

    #[test]
    fn test_md5_single_byte_change() {
        let a = content_md5(b"phone_number=1555&language=en");
        let b = content_md5(b"phone_number=1556&language=en");
        assert_ne!(a, b);
    }
}
