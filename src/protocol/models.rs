//! Response envelope and status classification.

use crate::TelesignError;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Parsed TeleSign response.
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response headers (lower-cased names).
    pub headers: HashMap<String, String>,

    /// Parsed JSON body.
    pub data: Value,

    /// Raw response body.
    pub raw_body: String,

    /// Verification code sent with the request, if any.
    pub verify_code: Option<String>,
}

impl ServiceResponse {
    /// `reference_id` returned by the Verify endpoints.
    pub fn reference_id(&self) -> Option<&str> {
        self.data.get("reference_id").and_then(Value::as_str)
    }

    /// Service status code from the `status.code` member.
    pub fn status_code(&self) -> Option<i64> {
        self.data
            .get("status")
            .and_then(|s| s.get("code"))
            .and_then(Value::as_i64)
    }
}

/// Classify a raw response by status code.
///
/// * `200` - body parsed as JSON
/// * `401` - `AuthorizationError`
/// * anything else - `ServiceError` carrying the raw body
pub fn validate_response(
    status: u16,
    headers: HashMap<String, String>,
    raw_body: String,
    verify_code: Option<String>,
) -> Result<ServiceResponse, TelesignError> {
    match status {
        200 => {
            let data = serde_json::from_str(&raw_body)
                .map_err(|e| TelesignError::ProtocolError(format!("Parse error: {}", e)))?;
            Ok(ServiceResponse {
                status,
                headers,
                data,
                raw_body,
                verify_code,
            })
        }
        401 => {
            warn!(status, "TeleSign rejected request signature or credentials");
            Err(TelesignError::AuthorizationError {
                status,
                body: raw_body,
            })
        }
        _ => {
            warn!(status, "TeleSign returned an error response");
            Err(TelesignError::ServiceError {
                status,
                body: raw_body,
            })
        }
    }
}
