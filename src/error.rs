use std::sync::Arc;

use reqwest::StatusCode;

use crate::ErrorCode;

/// Represents a result type for operations in the GO Feature Flag provider.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing possible errors that can occur in the provider.
///
/// Configuration errors are returned from [`GoFeatureFlagProvider::new()`]. Evaluation errors
/// never reach the caller as `Err`: they are folded into an [`EvaluationResult`] carrying the
/// default value and the matching [`ErrorCode`].
///
/// [`GoFeatureFlagProvider::new()`]: crate::GoFeatureFlagProvider::new
/// [`EvaluationResult`]: crate::EvaluationResult
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// No endpoint was configured.
    #[error("endpoint is missing from provider options")]
    MissingEndpoint,

    /// Endpoint is not a valid absolute URL.
    #[error("invalid endpoint configuration")]
    InvalidEndpoint(#[source] url::ParseError),

    /// Endpoint has a scheme the provider cannot talk to.
    #[error("unsupported endpoint scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),

    /// Failed to build the HTTP client.
    #[error("unable to build HTTP client")]
    HttpClient(#[source] Arc<reqwest::Error>),

    /// No evaluation context was supplied.
    #[error("GO Feature Flag needs an evaluation context to work")]
    InvalidContext,

    /// The `anonymous` attribute is present but is not a boolean.
    #[error("anonymous attribute must be a boolean")]
    InvalidAnonymous,

    /// The evaluation context has no targeting key.
    #[error("targetingKey field MUST be set in your evaluation context")]
    TargetingKeyMissing,

    /// The flag key cannot be addressed as a single path segment (empty, `.` or `..`).
    #[error("invalid flag key {0:?}")]
    InvalidFlagKey(String),

    /// The relay reported that the flag does not exist.
    #[error("flag not found")]
    FlagNotFound,

    /// The relay answered with a non-2xx status.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(StatusCode),

    /// Response body is not a valid evaluation envelope.
    #[error("malformed evaluation response")]
    MalformedResponse(#[source] Arc<serde_json::Error>),

    /// Network error.
    #[error(transparent)]
    Network(Arc<reqwest::Error>),
}

impl Error {
    /// Classify the error into the error code reported in evaluation results.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Error::InvalidContext | Error::InvalidAnonymous => ErrorCode::InvalidContext,
            Error::TargetingKeyMissing => ErrorCode::TargetingKeyMissing,
            Error::FlagNotFound => ErrorCode::FlagNotFound,
            Error::MissingEndpoint
            | Error::InvalidEndpoint(_)
            | Error::UnsupportedScheme(_)
            | Error::HttpClient(_)
            | Error::InvalidFlagKey(_)
            | Error::UnexpectedStatus(_)
            | Error::MalformedResponse(_)
            | Error::Network(_) => ErrorCode::General,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Network(Arc::new(value.without_url()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::MalformedResponse(Arc::new(value))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{Error, ErrorCode};

    #[test]
    fn context_errors_keep_their_codes() {
        assert_eq!(
            Error::TargetingKeyMissing.error_code(),
            ErrorCode::TargetingKeyMissing
        );
        assert_eq!(Error::InvalidContext.error_code(), ErrorCode::InvalidContext);
        assert_eq!(
            Error::InvalidAnonymous.error_code(),
            ErrorCode::InvalidContext
        );
    }

    #[test]
    fn transport_errors_are_general() {
        assert_eq!(
            Error::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR).error_code(),
            ErrorCode::General
        );
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(Error::from(parse_error).error_code(), ErrorCode::General);
        assert_eq!(
            Error::InvalidFlagKey("..".to_owned()).error_code(),
            ErrorCode::General
        );
    }

    #[test]
    fn not_found_is_flag_not_found() {
        assert_eq!(Error::FlagNotFound.error_code(), ErrorCode::FlagNotFound);
    }
}
