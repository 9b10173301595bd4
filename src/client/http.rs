//! Reqwest-based HTTP client for the TeleSign REST API.
//!
//! This module signs each request with a fresh nonce and timestamp, sends
//! it, and classifies the response by status code.

use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::crypto::credential::Credential;
use crate::crypto::pipeline::{prepare_request, SignedRequest};
use crate::crypto::signer::AuthMethod;
use crate::protocol::models::{validate_response, ServiceResponse};
use crate::protocol::request::{Fields, Method};
use crate::TelesignError;
use rand::rngs::OsRng;
use reqwest::blocking::{Client, Response};
use reqwest::header::USER_AGENT;
use reqwest::Proxy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Raw HTTP response with captured headers and body.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response headers with lower-cased names.
    pub headers: HashMap<String, String>,

    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Extract status, headers and body from a reqwest Response.
    fn from_response(response: Response) -> Result<Self, TelesignError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .map_err(|e| TelesignError::Transport(format!("Failed to read body: {}", e)))?
            .to_vec();

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Get the body as a UTF-8 string.
    pub fn body_str(&self) -> Result<&str, TelesignError> {
        std::str::from_utf8(&self.body)
            .map_err(|e| TelesignError::ProtocolError(format!("Invalid UTF-8 in body: {}", e)))
    }

    /// Classify this response, attaching the verification code that was sent.
    ///
    /// Only a 200 body must be valid UTF-8; rejection bodies are decoded
    /// lossily so the status still decides the error kind.
    pub fn into_service_response(
        self,
        verify_code: Option<String>,
    ) -> Result<ServiceResponse, TelesignError> {
        let body = if self.status == 200 {
            self.body_str()?.to_string()
        } else {
            String::from_utf8_lossy(&self.body).into_owned()
        };
        validate_response(self.status, self.headers, body, verify_code)
    }
}

/// TeleSign HTTP client.
///
/// Holds the credential and the transport; share one instance across
/// threads.
pub struct TelesignClient {
    client: Client,
    credential: Credential,
    base_url: String,
    auth_method: AuthMethod,
    user_agent: String,
    clock: Arc<dyn Clock>,
}

impl TelesignClient {
    /// Create a new client from config.
    ///
    /// # Errors
    /// * `ConfigError` - Invalid credential, host or proxy
    pub fn new(config: &ClientConfig) -> Result<Self, TelesignError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a client with a custom clock (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn new_with_clock(
        config: &ClientConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TelesignError> {
        Self::with_clock(config, clock)
    }

    fn with_clock(config: &ClientConfig, clock: Arc<dyn Clock>) -> Result<Self, TelesignError> {
        config.validate()?;
        let credential = Credential::new(&config.customer_id, &config.secret_key)?;

        // Only the configured proxy is used; HTTP(S)_PROXY is ignored.
        let mut builder = Client::builder().timeout(config.timeout);
        builder = match config.proxy_url() {
            Some(proxy_url) => {
                let proxy = Proxy::all(&proxy_url).map_err(|e| {
                    TelesignError::ConfigError(format!("Invalid proxy {}: {}", proxy_url, e))
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };
        let client = builder
            .build()
            .map_err(|e| TelesignError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credential,
            base_url: config.base_url(),
            auth_method: config.auth_method,
            user_agent: build_user_agent(),
            clock,
        })
    }

    /// Sign a request without sending it.
    pub fn sign(
        &self,
        method: Method,
        resource_path: &str,
        fields: Fields,
    ) -> Result<SignedRequest, TelesignError> {
        prepare_request(
            &self.credential,
            method,
            resource_path,
            fields,
            self.auth_method,
            self.clock.as_ref(),
            &mut OsRng,
        )
    }

    /// Sign and send a request, returning the unclassified response.
    pub fn send(&self, request: SignedRequest) -> Result<RawResponse, TelesignError> {
        let url = self.url_for(&request.resource_path);
        debug!(method = %request.method, url = %url, "sending signed TeleSign request");

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header(USER_AGENT, &self.user_agent);

        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .map_err(|e| TelesignError::Transport(format!("Request failed: {}", e)))?;

        RawResponse::from_response(response)
    }

    /// Sign, send and classify a request.
    ///
    /// # Errors
    /// * `InputError` - Invalid resource path
    /// * `Transport` - No response received
    /// * `AuthorizationError` - HTTP 401
    /// * `ServiceError` - Any other non-200 status
    pub fn execute(
        &self,
        method: Method,
        resource_path: &str,
        fields: Fields,
    ) -> Result<ServiceResponse, TelesignError> {
        self.execute_with_code(method, resource_path, fields, None)
    }

    pub(crate) fn execute_with_code(
        &self,
        method: Method,
        resource_path: &str,
        fields: Fields,
        verify_code: Option<String>,
    ) -> Result<ServiceResponse, TelesignError> {
        let request = self.sign(method, resource_path, fields)?;
        let response = self.send(request)?;
        debug!(status = response.status, resource = %resource_path, "TeleSign response received");
        response.into_service_response(verify_code)
    }

    /// Full URL for a resource path.
    pub fn url_for(&self, resource_path: &str) -> String {
        format!("{}{}", self.base_url, resource_path)
    }

    /// Get the configured customer ID.
    pub fn customer_id(&self) -> &str {
        self.credential.customer_id()
    }
}

/// Build a User-Agent string.
///
/// Format: `telesign-auth/<version>`
pub fn build_user_agent() -> String {
    format!("telesign-auth/{}", env!("CARGO_PKG_VERSION"))
}
