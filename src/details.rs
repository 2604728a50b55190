use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Result of a flag resolution returned to the host framework.
///
/// `value` is always usable: it holds either the resolved value or the caller's default. When
/// `error_code` is set, `value` is the default and `variant` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult<T> {
    /// Key of the evaluated flag.
    pub flag_key: String,
    /// Resolved value, or the default value on error or disabled flag.
    pub value: T,
    /// Why this value was chosen.
    pub reason: Reason,
    /// Name of the variation that produced the value.
    pub variant: Option<String>,
    /// Set when resolution failed.
    pub error_code: Option<ErrorCode>,
    /// Human-readable description of the failure.
    pub error_message: Option<String>,
}

impl<T> EvaluationResult<T> {
    pub(crate) fn error(
        flag_key: &str,
        default_value: T,
        error_code: ErrorCode,
        error_message: Option<String>,
    ) -> Self {
        EvaluationResult {
            flag_key: flag_key.to_owned(),
            value: default_value,
            reason: Reason::ERROR,
            variant: None,
            error_code: Some(error_code),
            error_message,
        }
    }

    /// Returns `true` if resolution failed and `value` holds the default.
    pub fn is_error(&self) -> bool {
        self.error_code.is_some()
    }
}

/// Reason why a value was resolved.
///
/// This is an open set: the relay may return reasons outside the predefined constants and they
/// are passed through verbatim.
///
/// ```
/// # use gofeatureflag::Reason;
/// assert_eq!(Reason::from("TARGETING_MATCH"), Reason::TARGETING_MATCH);
/// assert_eq!(Reason::from("CUSTOM_REASON").as_str(), "CUSTOM_REASON");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reason(Cow<'static, str>);

impl Reason {
    /// The value is static (no dynamic evaluation).
    pub const STATIC: Reason = Reason(Cow::Borrowed("STATIC"));
    /// The value fell back to a default.
    pub const DEFAULT: Reason = Reason(Cow::Borrowed("DEFAULT"));
    /// The value was resolved by a targeting rule.
    pub const TARGETING_MATCH: Reason = Reason(Cow::Borrowed("TARGETING_MATCH"));
    /// The value was resolved by a percentage split.
    pub const SPLIT: Reason = Reason(Cow::Borrowed("SPLIT"));
    /// The value was served from cache.
    pub const CACHED: Reason = Reason(Cow::Borrowed("CACHED"));
    /// The flag is disabled and the default value was returned.
    pub const DISABLED: Reason = Reason(Cow::Borrowed("DISABLED"));
    /// The reason is unknown.
    pub const UNKNOWN: Reason = Reason(Cow::Borrowed("UNKNOWN"));
    /// Resolution failed.
    pub const ERROR: Reason = Reason(Cow::Borrowed("ERROR"));

    /// Borrow the reason string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Reason {
    fn default() -> Self {
        Reason::UNKNOWN
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Reason {
    fn from(value: String) -> Self {
        Reason(Cow::Owned(value))
    }
}

impl From<&str> for Reason {
    fn from(value: &str) -> Self {
        Reason(Cow::Owned(value.to_owned()))
    }
}

impl log::kv::ToValue for Reason {
    fn to_value(&self) -> log::kv::Value<'_> {
        log::kv::Value::from_display(self)
    }
}

/// Error codes reported in [`EvaluationResult::error_code`].
///
/// Codes the relay sends that are not known here are kept verbatim in [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    /// The provider is not ready to evaluate flags.
    ProviderNotReady,
    /// The flag does not exist.
    FlagNotFound,
    /// The resolved value could not be parsed.
    ParseError,
    /// The resolved value does not match the requested type.
    TypeMismatch,
    /// The evaluation context has no targeting key.
    TargetingKeyMissing,
    /// The evaluation context is absent or invalid.
    InvalidContext,
    /// Any other failure, including transport errors.
    General,
    /// A code defined by the relay.
    Other(String),
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::ProviderNotReady => "PROVIDER_NOT_READY",
            ErrorCode::FlagNotFound => "FLAG_NOT_FOUND",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::TargetingKeyMissing => "TARGETING_KEY_MISSING",
            ErrorCode::InvalidContext => "INVALID_CONTEXT",
            ErrorCode::General => "GENERAL",
            ErrorCode::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorCode {
    fn from(value: &str) -> Self {
        match value {
            "PROVIDER_NOT_READY" => ErrorCode::ProviderNotReady,
            "FLAG_NOT_FOUND" => ErrorCode::FlagNotFound,
            "PARSE_ERROR" => ErrorCode::ParseError,
            "TYPE_MISMATCH" => ErrorCode::TypeMismatch,
            "TARGETING_KEY_MISSING" => ErrorCode::TargetingKeyMissing,
            "INVALID_CONTEXT" => ErrorCode::InvalidContext,
            "GENERAL" => ErrorCode::General,
            other => ErrorCode::Other(other.to_owned()),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(value: String) -> Self {
        ErrorCode::from(value.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(value: ErrorCode) -> Self {
        value.as_str().to_owned()
    }
}

impl log::kv::ToValue for ErrorCode {
    fn to_value(&self) -> log::kv::Value<'_> {
        log::kv::Value::from_display(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, Reason};

    #[test]
    fn known_error_codes_are_recognized() {
        assert_eq!(ErrorCode::from("FLAG_NOT_FOUND"), ErrorCode::FlagNotFound);
        assert_eq!(
            ErrorCode::from("TARGETING_KEY_MISSING"),
            ErrorCode::TargetingKeyMissing
        );
    }

    #[test]
    fn unknown_error_codes_pass_through() {
        let code = ErrorCode::from("RELAY_EXPLODED");
        assert_eq!(code, ErrorCode::Other("RELAY_EXPLODED".to_owned()));
        assert_eq!(code.to_string(), "RELAY_EXPLODED");
    }

    #[test]
    fn error_code_serializes_as_string() {
        let json = serde_json::to_string(&ErrorCode::TypeMismatch).unwrap();
        assert_eq!(json, r#""TYPE_MISMATCH""#);
        let parsed: ErrorCode = serde_json::from_str(r#""SOMETHING_ELSE""#).unwrap();
        assert_eq!(parsed, ErrorCode::Other("SOMETHING_ELSE".to_owned()));
    }

    #[test]
    fn owned_reason_equals_constant() {
        let reason: Reason = serde_json::from_str(r#""DISABLED""#).unwrap();
        assert_eq!(reason, Reason::DISABLED);
    }
}
