//! Client configuration.

use crate::crypto::signer::{decode_secret_key, AuthMethod};
use crate::TelesignError;
use std::time::Duration;

/// Default REST host for TeleSign web services.
pub const DEFAULT_API_HOST: &str = "rest.telesign.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a TeleSign client.
///
/// Both values can be obtained from the TeleSign customer portal.
#[derive(Clone)]
pub struct ClientConfig {
    /// Customer ID identifying the TeleSign account.
    pub customer_id: String,

    /// Base64-encoded secret key (standard alphabet, padded).
    /// SECURITY: never logged; `Debug` redacts it.
    pub secret_key: String,

    /// REST host used in the base URL.
    pub api_host: String,

    /// Use HTTPS (`true`) or plain HTTP.
    pub ssl: bool,

    /// Optional proxy as `host:port`.
    pub proxy_host: Option<String>,

    /// Digest used to sign requests.
    pub auth_method: AuthMethod,

    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with the default host, HTTPS, no proxy and HMAC-SHA256.
    pub fn new(customer_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            secret_key: secret_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            ssl: true,
            proxy_host: None,
            auth_method: AuthMethod::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the REST host.
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    /// Toggle HTTPS.
    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = ssl;
        self
    }

    /// Route requests through a proxy (`host:port`).
    pub fn with_proxy_host(mut self, proxy_host: impl Into<String>) -> Self {
        self.proxy_host = Some(proxy_host.into());
        self
    }

    /// Select the signing digest.
    pub fn with_auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn scheme(&self) -> &'static str {
        if self.ssl {
            "https"
        } else {
            "http"
        }
    }

    /// Base URL, e.g. `https://rest.telesign.com`.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.api_host)
    }

    /// Proxy URL using the same scheme as the base URL.
    pub fn proxy_url(&self) -> Option<String> {
        self.proxy_host
            .as_ref()
            .map(|host| format!("{}://{}", self.scheme(), host))
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), TelesignError> {
        if self.customer_id.trim().is_empty() {
            return Err(TelesignError::ConfigError(
                "customer_id cannot be empty".to_string(),
            ));
        }
        if self.api_host.trim().is_empty() {
            return Err(TelesignError::ConfigError(
                "api_host cannot be empty".to_string(),
            ));
        }
        decode_secret_key(&self.secret_key)?;
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("customer_id", &self.customer_id)
            .field("secret_key", &"<redacted>")
            .field("api_host", &self.api_host)
            .field("ssl", &self.ssl)
            .field("proxy_host", &self.proxy_host)
            .field("auth_method", &self.auth_method)
            .field("timeout", &self.timeout)
            .finish()
    }
}
