//! An HTTP client that asks the relay proxy to evaluate a flag.
use std::sync::Arc;

use reqwest::{header, StatusCode, Url};

use crate::{request::ResolutionRequest, Error, ProviderOptions, Result};

const USER_AGENT: &str = concat!("gofeatureflag-rust/", env!("CARGO_PKG_VERSION"));

/// Raw answer of the relay for a 2xx response. The body is left unparsed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Issues one evaluation request per call: no retries, no caching.
#[derive(Debug)]
pub(crate) struct RemoteResolver {
    // Client holds a connection pool internally, so we're reusing the client between requests.
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl RemoteResolver {
    pub fn new(options: ProviderOptions) -> Result<RemoteResolver> {
        let endpoint = options.validated_endpoint()?;

        let client = match options.http_client {
            Some(client) => client,
            None => reqwest::blocking::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(options.timeout)
                .build()
                .map_err(|err| Error::HttpClient(Arc::new(err)))?,
        };

        Ok(RemoteResolver { client, endpoint })
    }

    /// URL of the evaluation route for `flag_key`, relative to the endpoint path.
    ///
    /// Dot segments are dropped by URL normalization, so `.` and `..` (and the empty key) would
    /// address another route and are refused.
    fn evaluation_url(&self, flag_key: &str) -> Result<Url> {
        if matches!(flag_key, "" | "." | "..") {
            return Err(Error::InvalidFlagKey(flag_key.to_owned()));
        }

        let mut url = self.endpoint.clone();
        url.set_query(None);
        url.set_fragment(None);
        // The endpoint has been validated as an http(s) URL, so it can always be a base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "feature", flag_key, "eval"]);
        }
        Ok(url)
    }

    pub fn resolve(&self, flag_key: &str, request: &ResolutionRequest) -> Result<RawResponse> {
        let url = self.evaluation_url(flag_key)?;

        log::debug!(target: "gofeatureflag", flag_key; "requesting flag evaluation");
        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            // Set per request as well, since a caller-supplied client has its own default.
            .header(header::USER_AGENT, USER_AGENT)
            .json(request)
            .send()
            .inspect_err(|err| {
                log::warn!(target: "gofeatureflag", flag_key; "error while requesting flag evaluation: {:?}", err);
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            log::debug!(target: "gofeatureflag", flag_key; "relay reported flag as not found");
            return Err(Error::FlagNotFound);
        }
        if !status.is_success() {
            log::warn!(target: "gofeatureflag",
                       flag_key,
                       status = status.as_u16();
                       "received non-2xx response while evaluating flag");
            return Err(Error::UnexpectedStatus(status));
        }

        let body = response.text()?;

        log::debug!(target: "gofeatureflag", flag_key; "successfully fetched flag evaluation");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, ProviderOptions};

    use super::RemoteResolver;

    fn resolver(endpoint: &str) -> RemoteResolver {
        RemoteResolver::new(ProviderOptions::from_endpoint(endpoint)).unwrap()
    }

    #[test]
    fn evaluation_url_from_root_endpoint() {
        assert_eq!(
            resolver("https://gofeatureflag.org/")
                .evaluation_url("bool_targeting_match")
                .unwrap()
                .as_str(),
            "https://gofeatureflag.org/v1/feature/bool_targeting_match/eval"
        );
        assert_eq!(
            resolver("http://localhost:1031")
                .evaluation_url("my-flag")
                .unwrap()
                .as_str(),
            "http://localhost:1031/v1/feature/my-flag/eval"
        );
    }

    #[test]
    fn evaluation_url_keeps_base_path() {
        assert_eq!(
            resolver("https://example.com/relay/?debug=1")
                .evaluation_url("flag")
                .unwrap()
                .as_str(),
            "https://example.com/relay/v1/feature/flag/eval"
        );
    }

    #[test]
    fn evaluation_url_escapes_flag_key() {
        assert_eq!(
            resolver("https://example.com")
                .evaluation_url("a/b c")
                .unwrap()
                .as_str(),
            "https://example.com/v1/feature/a%2Fb%20c/eval"
        );
    }

    #[test]
    fn evaluation_url_refuses_dot_and_empty_keys() {
        let resolver = resolver("https://example.com/relay/");
        for flag_key in ["", ".", ".."] {
            assert!(
                matches!(
                    resolver.evaluation_url(flag_key),
                    Err(Error::InvalidFlagKey(ref key)) if key == flag_key
                ),
                "flag key: {flag_key:?}"
            );
        }
        // Dots inside a key are regular characters.
        assert_eq!(
            resolver.evaluation_url("...").unwrap().as_str(),
            "https://example.com/relay/v1/feature/.../eval"
        );
        assert_eq!(
            resolver.evaluation_url("a.b").unwrap().as_str(),
            "https://example.com/relay/v1/feature/a.b/eval"
        );
    }
}
