use serde::Deserialize;

use crate::{
    resolver::RawResponse,
    value::{FlagType, ValueKind},
    Error, ErrorCode, EvaluationResult, Reason, Result,
};

/// Evaluation envelope returned by the relay. Untrusted input.
///
/// Extra fields sent by the relay (`trackEvents`, `variationType`, `failed`, `version`,
/// `cacheable`, `metadata`) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolutionResponse {
    #[serde(default)]
    value: serde_json::Value,
    #[serde(default)]
    reason: Option<Reason>,
    #[serde(default)]
    variant: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_details: Option<String>,
}

impl ResolutionResponse {
    fn parse(raw: &RawResponse) -> Result<ResolutionResponse> {
        log::trace!(target: "gofeatureflag", status = raw.status.as_u16(); "parsing evaluation response");
        // Parsing into a map first rejects arrays, which serde would otherwise accept for structs.
        let envelope: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw.body)?;
        Ok(serde_json::from_value(serde_json::Value::Object(envelope))?)
    }

    /// Service-level error, if any. An empty code counts as none.
    fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(ErrorCode::from)
    }
}

/// Turn the outcome of a remote resolution into a typed result.
///
/// Outcomes are checked in order, first match wins:
/// 1. resolution failed (context, transport, not found, malformed body);
/// 2. the relay reported an error code;
/// 3. the value has the wrong type for `T`;
/// 4. the flag is disabled;
/// 5. success, with the relay's reason passed through verbatim.
///
/// Every failure returns `default_value` with `Reason::ERROR` and no variant.
pub(crate) fn interpret<T: FlagType>(
    flag_key: &str,
    default_value: T,
    raw: Result<RawResponse>,
) -> EvaluationResult<T> {
    let response = match raw.and_then(|raw| ResolutionResponse::parse(&raw)) {
        Ok(response) => response,
        Err(err) => {
            let error_code = err.error_code();
            if matches!(err, Error::FlagNotFound) {
                log::debug!(target: "gofeatureflag", flag_key; "flag not found, returning default value");
            } else {
                log::warn!(target: "gofeatureflag",
                           flag_key,
                           error_code;
                           "error occurred while evaluating a flag: {:?}", err);
            }
            return EvaluationResult::error(flag_key, default_value, error_code, Some(err.to_string()));
        }
    };

    if let Some(error_code) = response.error_code() {
        log::warn!(target: "gofeatureflag",
                   flag_key,
                   error_code;
                   "relay returned an error while evaluating a flag");
        let message = response
            .error_details
            .unwrap_or_else(|| format!("relay returned error code {error_code}"));
        return EvaluationResult::error(flag_key, default_value, error_code, Some(message));
    }

    let found = ValueKind::of(&response.value);
    let value = if T::TYPE.accepts(found) {
        T::from_wire(response.value)
    } else {
        None
    };
    let Some(value) = value else {
        log::warn!(target: "gofeatureflag",
                   flag_key,
                   expected:serde = T::TYPE,
                   found:serde = found;
                   "resolved value has an unexpected type");
        return EvaluationResult::error(
            flag_key,
            default_value,
            ErrorCode::TypeMismatch,
            Some(format!(
                "invalid flag type (expected: {:?}, found: {:?})",
                T::TYPE,
                found
            )),
        );
    };

    let reason = response.reason.unwrap_or_default();
    let result = if reason == Reason::DISABLED {
        EvaluationResult {
            flag_key: flag_key.to_owned(),
            value: default_value,
            reason: Reason::DISABLED,
            variant: None,
            error_code: None,
            error_message: None,
        }
    } else {
        EvaluationResult {
            flag_key: flag_key.to_owned(),
            value,
            reason,
            variant: response.variant,
            error_code: None,
            error_message: None,
        }
    };

    log::trace!(target: "gofeatureflag",
                flag_key,
                reason = result.reason,
                variant:serde = result.variant;
                "evaluated a flag");

    result
}
