//! Verify endpoints: deliver a one-time code by SMS or voice, then check it.

use crate::client::http::TelesignClient;
use crate::protocol::models::ServiceResponse;
use crate::protocol::request::{Fields, Method, UseCaseCode};
use crate::TelesignError;

/// Resource for SMS verification.
pub const SMS_RESOURCE: &str = "/v1/verify/sms";

/// Resource for voice verification.
pub const CALL_RESOURCE: &str = "/v1/verify/call";

/// Options for [`Verify::sms`].
#[derive(Debug, Clone)]
pub struct SmsOptions {
    /// Code to send; TeleSign generates one when `None`.
    pub verify_code: Option<String>,
    /// Message language.
    pub language: String,
    /// Message template containing `$$CODE$$`.
    pub template: String,
    /// Use-case code.
    pub use_case_code: Option<UseCaseCode>,
    /// End-user IP address.
    pub originating_ip: Option<String>,
    /// Additional fields, overriding the ones above.
    pub extra: Option<Fields>,
}

impl Default for SmsOptions {
    fn default() -> Self {
        Self {
            verify_code: None,
            language: "en".to_string(),
            template: String::new(),
            use_case_code: None,
            originating_ip: None,
            extra: None,
        }
    }
}

/// Options for [`Verify::call`].
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Code to speak; TeleSign generates one when `None`.
    pub verify_code: Option<String>,
    /// Use-case code.
    pub use_case_code: Option<UseCaseCode>,
    /// Verification method.
    pub verify_method: String,
    /// Spoken language.
    pub language: String,
    /// Extension type.
    pub extension_type: String,
    /// Redial behavior.
    pub redial: String,
    /// End-user IP address.
    pub originating_ip: Option<String>,
    /// Require the user to press a key before the code is spoken.
    pub pressx: Option<String>,
    /// Additional fields, overriding the ones above.
    pub extra: Option<Fields>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            verify_code: None,
            use_case_code: None,
            verify_method: String::new(),
            language: "en".to_string(),
            extension_type: String::new(),
            redial: String::new(),
            originating_ip: None,
            pressx: None,
            extra: None,
        }
    }
}

fn require_phone(phone_number: &str) -> Result<(), TelesignError> {
    if phone_number.trim().is_empty() {
        return Err(TelesignError::InputError(
            "phone_number cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Body fields for an SMS verification.
pub fn sms_fields(phone_number: &str, options: &SmsOptions) -> Fields {
    let mut fields = Fields::new();
    fields.set("phone_number", phone_number);
    fields.set("language", options.language.as_str());
    fields.set("template", options.template.as_str());
    fields.set_opt(
        "verify_code",
        options.verify_code.as_deref().filter(|c| !c.is_empty()),
    );
    fields.set_opt("ucid", options.use_case_code.map(UseCaseCode::as_str));
    fields.set_opt("originating_ip", options.originating_ip.as_deref());
    if let Some(extra) = &options.extra {
        fields.extend(extra.clone());
    }
    fields
}

/// Body fields for a voice verification.
pub fn call_fields(phone_number: &str, options: &CallOptions) -> Fields {
    let mut fields = Fields::new();
    fields.set("phone_number", phone_number);
    fields.set("language", options.language.as_str());
    fields.set("verify_method", options.verify_method.as_str());
    fields.set("extension_type", options.extension_type.as_str());
    fields.set("redial", options.redial.as_str());
    fields.set_opt(
        "verify_code",
        options.verify_code.as_deref().filter(|c| !c.is_empty()),
    );
    fields.set_opt("pressx", options.pressx.as_deref().filter(|p| !p.is_empty()));
    fields.set_opt("ucid", options.use_case_code.map(UseCaseCode::as_str));
    fields.set_opt("originating_ip", options.originating_ip.as_deref());
    if let Some(extra) = &options.extra {
        fields.extend(extra.clone());
    }
    fields
}

/// Resource for a verification status check.
pub fn status_resource(reference_id: &str) -> Result<String, TelesignError> {
    if reference_id.trim().is_empty() {
        return Err(TelesignError::InputError(
            "reference_id cannot be empty".to_string(),
        ));
    }
    Ok(format!("/v1/verify/{}", reference_id))
}

/// Verify service.
pub struct Verify<'a> {
    client: &'a TelesignClient,
}

impl<'a> Verify<'a> {
    /// Wrap a client.
    pub fn new(client: &'a TelesignClient) -> Self {
        Self { client }
    }

    /// Send a verification code by text message.
    ///
    /// The response echoes `options.verify_code` so it can be passed to
    /// [`Verify::status`].
    pub fn sms(
        &self,
        phone_number: &str,
        options: &SmsOptions,
    ) -> Result<ServiceResponse, TelesignError> {
        require_phone(phone_number)?;
        let fields = sms_fields(phone_number, options);
        self.client.execute_with_code(
            Method::Post,
            SMS_RESOURCE,
            fields,
            options.verify_code.clone(),
        )
    }

    /// Speak a verification code over a voice call.
    pub fn call(
        &self,
        phone_number: &str,
        options: &CallOptions,
    ) -> Result<ServiceResponse, TelesignError> {
        require_phone(phone_number)?;
        let fields = call_fields(phone_number, options);
        self.client.execute_with_code(
            Method::Post,
            CALL_RESOURCE,
            fields,
            options.verify_code.clone(),
        )
    }

    /// Retrieve the result of a verification, optionally checking a user-entered code.
    pub fn status(
        &self,
        reference_id: &str,
        verify_code: Option<&str>,
        extra: Option<Fields>,
    ) -> Result<ServiceResponse, TelesignError> {
        let resource = status_resource(reference_id)?;
        let mut fields = Fields::new();
        fields.set_opt("verify_code", verify_code);
        if let Some(extra) = extra {
            fields.extend(extra);
        }
        self.client.execute(Method::Get, &resource, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn test_status_rejects_reference_that_would_alter_path() {
        let client = TelesignClient::new(&ClientConfig::new("CUST1", "dGVzdGtleQ==")).unwrap();
        for bad in ["REF#1", "REF 1", ".."] {
            assert!(
                matches!(
                    Verify::new(&client).status(bad, None, None),
                    Err(TelesignError::InputError(_))
                ),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_sms_default_fields() {
        let fields = sms_fields("1555", &SmsOptions::default());
        assert_eq!(fields.to_form_body(), "phone_number=1555&language=en&template=");
    }

    #[test]
    fn test_sms_full_fields() {
        let options = SmsOptions {
            verify_code: Some("12345".to_string()),
            use_case_code: Some(UseCaseCode::Atck),
            originating_ip: Some("203.0.113.7".to_string()),
            ..SmsOptions::default()
        };
        let fields = sms_fields("1555", &options);

        assert_eq!(fields.get("verify_code"), Some("12345"));
        assert_eq!(fields.get("ucid"), Some("ATCK"));
        assert_eq!(fields.get("originating_ip"), Some("203.0.113.7"));
    }

    #[test]
    fn test_sms_empty_code_omitted() {
        let options = SmsOptions {
            verify_code: Some(String::new()),
            ..SmsOptions::default()
        };
        assert!(sms_fields("1555", &options).get("verify_code").is_none());
    }

    #[test]
    fn test_call_fields() {
        let options = CallOptions {
            pressx: Some("1".to_string()),
            extra: Some([("language", "de")].into_iter().collect()),
            ..CallOptions::default()
        };
        let fields = call_fields("1555", &options);

        assert_eq!(
            fields.to_form_body(),
            "phone_number=1555&language=de&verify_method=&extension_type=&redial=&pressx=1"
        );
    }

    #[test]
    fn test_status_resource() {
        assert_eq!(status_resource("ABC123").unwrap(), "/v1/verify/ABC123");
        assert!(matches!(
            status_resource(""),
            Err(TelesignError::InputError(_))
        ));
    }

    #[test]
    fn test_require_phone() {
        assert!(require_phone("1555").is_ok());
        assert!(matches!(
            require_phone(" "),
            Err(TelesignError::InputError(_))
        ));
    }
}
