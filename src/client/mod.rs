//! HTTP transport for signed requests.

pub mod http;
