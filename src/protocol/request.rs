//! Request-side types: HTTP method, ordered fields and use-case codes.

use crate::TelesignError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// HTTP methods accepted by the TeleSign REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether fields travel as a url-encoded body rather than a query string.
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = TelesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(TelesignError::InputError(format!(
                "Unsupported HTTP method: {}",
                other
            ))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Insertion-ordered request parameters.
///
/// Setting an existing key replaces its value in place, so extra
/// parameters supplied by the caller override defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fields(Vec<(String, String)>);

impl Fields {
    /// Empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Insert a field only when a value is present.
    pub fn set_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Merge another field set, replacing values for existing keys.
    pub fn extend(&mut self, other: Fields) {
        for (key, value) in other.0 {
            self.set(key, value);
        }
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `application/x-www-form-urlencoded`.
    pub fn to_form_body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.set(key, value);
        }
        fields
    }
}

/// Four-letter code describing why a request is made (sent as `ucid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCaseCode {
    /// Prevent bulk account creation + spam.
    Bacs,
    /// Prevent bulk account creation + fraud.
    Bacf,
    /// Prevent chargebacks.
    Chbk,
    /// Prevent account takeover/compromise.
    Atck,
    /// Prevent false lead entry.
    Lead,
    /// Prevent fake/missed reservations.
    Resv,
    /// Password reset.
    Pwrt,
    /// Prevent identity theft.
    Thef,
    /// Prevent telecom fraud.
    Telf,
    /// Prevent prescription fraud.
    Rxpf,
    /// Other.
    Othr,
    /// Unknown/prefer not to say.
    Unkn,
}

impl UseCaseCode {
    /// Wire value of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bacs => "BACS",
            Self::Bacf => "BACF",
            Self::Chbk => "CHBK",
            Self::Atck => "ATCK",
            Self::Lead => "LEAD",
            Self::Resv => "RESV",
            Self::Pwrt => "PWRT",
            Self::Thef => "THEF",
            Self::Telf => "TELF",
            Self::Rxpf => "RXPF",
            Self::Othr => "OTHR",
            Self::Unkn => "UNKN",
        }
    }
}

impl fmt::Display for UseCaseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCaseCode {
    type Err = TelesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = match s.trim().to_ascii_uppercase().as_str() {
            "BACS" => Self::Bacs,
            "BACF" => Self::Bacf,
            "CHBK" => Self::Chbk,
            "ATCK" => Self::Atck,
            "LEAD" => Self::Lead,
            "RESV" => Self::Resv,
            "PWRT" => Self::Pwrt,
            "THEF" => Self::Thef,
            "TELF" => Self::Telf,
            "RXPF" => Self::Rxpf,
            "OTHR" => Self::Othr,
            "UNKN" => Self::Unkn,
            other => {
                return Err(TelesignError::InputError(format!(
                    "Unknown use case code: {}",
                    other
                )))
            }
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
    }

    #[test]
    fn test_method_parse_unknown() {
        assert!(matches!(
            "PATCH".parse::<Method>(),
            Err(TelesignError::InputError(_))
        ));
    }

    #[test]
    fn test_method_body() {
        assert!(Method::Post.has_body());
        assert!(Method::Put.has_body());
        assert!(!Method::Get.has_body());
        assert!(!Method::Delete.has_body());
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let fields: Fields = [("phone_number", "1555"), ("language", "en")]
            .into_iter()
            .collect();
        assert_eq!(fields.to_form_body(), "phone_number=1555&language=en");
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["phone_number", "language"]);
    }

    #[test]
    fn test_fields_override_in_place() {
        let mut fields = Fields::new();
        fields.set("phone_number", "1555");
        fields.set("language", "en");

        let mut extra = Fields::new();
        extra.set("language", "fr");
        extra.set("custom", "1");
        fields.extend(extra);

        assert_eq!(fields.to_form_body(), "phone_number=1555&language=fr&custom=1");
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_fields_form_encoding() {
        let mut fields = Fields::new();
        fields.set("phone_number", "+1 555");
        fields.set("template", "Code: $$CODE$$");
        assert_eq!(
            fields.to_form_body(),
            "phone_number=%2B1+555&template=Code%3A+%24%24CODE%24%24"
        );
    }

    #[test]
    fn test_fields_set_opt() {
        let mut fields = Fields::new();
        fields.set_opt("ucid", None);
        assert!(fields.is_empty());
        fields.set_opt("ucid", Some("ATCK"));
        assert_eq!(fields.get("ucid"), Some("ATCK"));
    }

    #[test]
    fn test_use_case_codes() {
        assert_eq!(UseCaseCode::Atck.as_str(), "ATCK");
        assert_eq!("rxpf".parse::<UseCaseCode>().unwrap(), UseCaseCode::Rxpf);
        assert!("ABCD".parse::<UseCaseCode>().is_err());
    }
}
