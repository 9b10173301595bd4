//! Cryptographic primitives for request authentication.

pub mod code;
pub mod credential;
pub mod digest;
pub mod headers;
pub mod nonce;
pub mod pipeline;
pub mod signer;
pub mod signing;
