//! # telesign-auth
//!
//! **Signed-request client for the TeleSign PhoneID and Verify REST services.**
//!
//! Every request is authenticated with an HMAC over a canonical string built
//! from the method, body digest, timestamp, nonce and resource path. The
//! service recomputes the same HMAC with your secret key and rejects any
//! request whose headers or body diverge from what was signed.
//!
//! ## Features
//!
//! - **Byte-exact canonicalization** - fixed six-line string to sign
//! - **HMAC-SHA256 / HMAC-SHA1** - keyed by the base64-decoded secret key
//! - **Replay resistance** - fresh UUID nonce and timestamp for each request
//! - **Content-MD5 body binding** - POST/PUT bodies are hashed exactly as sent
//! - **One-time codes** - numeric verification codes from the OS RNG
//!
//! ## Quickstart
//!
//! ```no_run
//! use telesign_auth::{ClientConfig, SmsOptions, TelesignClient, UseCaseCode, Verify};
//!
//! fn main() -> Result<(), telesign_auth::TelesignError> {
//!     let config = ClientConfig::new(
//!         "FFFFFFFF-EEEE-DDDD-1234-AB1234567890",
//!         "dGVzdGtleQ==",
//!     );
//!     let client = TelesignClient::new(&config)?;
//!
//!     let options = SmsOptions {
//!         verify_code: Some(telesign_auth::generate_code(6)?),
//!         use_case_code: Some(UseCaseCode::Atck),
//!         ..SmsOptions::default()
//!     };
//!     let sent = Verify::new(&client).sms("13105551212", &options)?;
//!
//!     if let Some(reference_id) = sent.reference_id() {
//!         let status = Verify::new(&client).status(reference_id, sent.verify_code.as_deref(), None)?;
//!         println!("{}", status.raw_body);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Signing without the HTTP client
//!
//! ```
//! use telesign_auth::{sign_request, AuthMethod, Credential, Fields, Method};
//!
//! let credential = Credential::new("CUST1", "dGVzdGtleQ==").unwrap();
//! let signed = sign_request(
//!     &credential,
//!     Method::Get,
//!     "/v1/verify/abc123",
//!     Fields::new(),
//!     AuthMethod::HmacSha256,
//!     "T1",
//!     "n1",
//! )
//! .unwrap();
//! assert!(signed.headers.authorization.starts_with("TSA CUST1:"));
//! ```
//!
//! ## Errors
//!
//! [`TelesignError::ConfigError`] and [`TelesignError::InputError`] mean the
//! client or call is wrong and retrying will not help.
//! [`TelesignError::AuthorizationError`] and [`TelesignError::ServiceError`]
//! mean the service answered and refused the request.

#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Crypto layer
pub mod crypto;

// Protocol layer
pub mod protocol;

// Client layer
pub mod client;

// Endpoints
pub mod services;

// Re-exports for public API
pub use client::http::TelesignClient;
pub use clock::{Clock, SystemClock};
pub use config::ClientConfig;
pub use crypto::code::{generate_code, generate_code_with};
pub use crypto::credential::Credential;
pub use crypto::digest::content_md5;
pub use crypto::headers::{build_headers, AuthHeaders};
pub use crypto::nonce::{generate_nonce, generate_nonce_with, generate_timestamp, parse_timestamp};
pub use crypto::pipeline::{prepare_request, sign_request, SignedRequest};
pub use crypto::signer::{sign, AuthMethod};
pub use crypto::signing::build_canonical_string;
pub use errors::TelesignError;
pub use protocol::models::ServiceResponse;
pub use protocol::request::{Fields, Method, UseCaseCode};
pub use services::phoneid::PhoneId;
pub use services::verify::{CallOptions, SmsOptions, Verify};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::FixedClock;
