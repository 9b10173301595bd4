//! PhoneID endpoints: details about a phone number.

use crate::client::http::TelesignClient;
use crate::protocol::models::ServiceResponse;
use crate::protocol::request::{Fields, Method, UseCaseCode};
use crate::TelesignError;

/// PhoneID lookup variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneIdKind {
    /// Phone type and approximate location.
    Standard,
    /// Risk score from 0 to 1000.
    Score,
    /// Standard details plus name and address.
    Contact,
    /// Standard details plus live subscriber data.
    Live,
}

impl PhoneIdKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Score => "score",
            Self::Contact => "contact",
            Self::Live => "live",
        }
    }
}

/// Resource path for a PhoneID lookup.
pub fn phoneid_resource(kind: PhoneIdKind, phone_number: &str) -> Result<String, TelesignError> {
    if phone_number.trim().is_empty() {
        return Err(TelesignError::InputError(
            "phone_number cannot be empty".to_string(),
        ));
    }
    Ok(format!("/v1/phoneid/{}/{}", kind.as_str(), phone_number))
}

/// Query fields for a PhoneID lookup.
pub fn phoneid_fields(use_case_code: Option<UseCaseCode>, extra: Option<Fields>) -> Fields {
    let mut fields = Fields::new();
    fields.set_opt("ucid", use_case_code.map(UseCaseCode::as_str));
    if let Some(extra) = extra {
        fields.extend(extra);
    }
    fields
}

/// PhoneID service.
pub struct PhoneId<'a> {
    client: &'a TelesignClient,
}

impl<'a> PhoneId<'a> {
    /// Wrap a client.
    pub fn new(client: &'a TelesignClient) -> Self {
        Self { client }
    }

    fn lookup(
        &self,
        kind: PhoneIdKind,
        phone_number: &str,
        use_case_code: Option<UseCaseCode>,
        extra: Option<Fields>,
    ) -> Result<ServiceResponse, TelesignError> {
        let resource = phoneid_resource(kind, phone_number)?;
        let fields = phoneid_fields(use_case_code, extra);
        self.client.execute(Method::Get, &resource, fields)
    }

    /// Phone type and approximate geographic location.
    pub fn standard(
        &self,
        phone_number: &str,
        use_case_code: Option<UseCaseCode>,
        extra: Option<Fields>,
    ) -> Result<ServiceResponse, TelesignError> {
        self.lookup(PhoneIdKind::Standard, phone_number, use_case_code, extra)
    }

    /// Risk score for the number.
    pub fn score(
        &self,
        phone_number: &str,
        use_case_code: UseCaseCode,
        extra: Option<Fields>,
    ) -> Result<ServiceResponse, TelesignError> {
        self.lookup(PhoneIdKind::Score, phone_number, Some(use_case_code), extra)
    }

    /// Standard details plus name and address.
    pub fn contact(
        &self,
        phone_number: &str,
        use_case_code: UseCaseCode,
        extra: Option<Fields>,
    ) -> Result<ServiceResponse, TelesignError> {
        self.lookup(PhoneIdKind::Contact, phone_number, Some(use_case_code), extra)
    }

    /// Standard details plus live subscriber data.
    pub fn live(
        &self,
        phone_number: &str,
        use_case_code: UseCaseCode,
        extra: Option<Fields>,
    ) -> Result<ServiceResponse, TelesignError> {
        self.lookup(PhoneIdKind::Live, phone_number, Some(use_case_code), extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn test_lookup_rejects_number_that_would_alter_path() {
        let client = TelesignClient::new(&ClientConfig::new("CUST1", "dGVzdGtleQ==")).unwrap();
        let phoneid = PhoneId::new(&client);
        for bad in ["1555#x", "1555 0000", "../admin"] {
            assert!(
                matches!(phoneid.standard(bad, None, None), Err(TelesignError::InputError(_))),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_resources() {
        assert_eq!(
            phoneid_resource(PhoneIdKind::Standard, "13105551212").unwrap(),
            "/v1/phoneid/standard/13105551212"
        );
        assert_eq!(
            phoneid_resource(PhoneIdKind::Live, "13105551212").unwrap(),
            "/v1/phoneid/live/13105551212"
        );
    }

    #[test]
    fn test_empty_phone_number() {
        assert!(matches!(
            phoneid_resource(PhoneIdKind::Score, ""),
            Err(TelesignError::InputError(_))
        ));
    }

    #[test]
    fn test_fields_with_extra_override() {
        let extra: Fields = [("ucid", "OTHR"), ("account_lifecycle_event", "create")]
            .into_iter()
            .collect();
        let fields = phoneid_fields(Some(UseCaseCode::Atck), Some(extra));

        assert_eq!(fields.get("ucid"), Some("OTHR"));
        assert_eq!(fields.get("account_lifecycle_event"), Some("create"));
    }

    #[test]
    fn test_standard_without_ucid() {
        assert!(phoneid_fields(None, None).is_empty());
    }
}
