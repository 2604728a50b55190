use std::time::Duration;

use url::{Host, Url};

use crate::{Error, GoFeatureFlagProvider, Result};

/// Configuration for [`GoFeatureFlagProvider`].
///
/// # Examples
/// ```
/// # use std::time::Duration;
/// # use gofeatureflag::ProviderOptions;
/// let provider = ProviderOptions::from_endpoint("http://localhost:1031")
///     .timeout(Duration::from_secs(2))
///     .to_provider()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProviderOptions {
    pub(crate) endpoint: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) http_client: Option<reqwest::blocking::Client>,
}

impl ProviderOptions {
    /// Create options pointing at a relay proxy.
    ///
    /// ```
    /// # use gofeatureflag::ProviderOptions;
    /// ProviderOptions::from_endpoint("https://relay.example.com/");
    /// ```
    pub fn from_endpoint(endpoint: impl Into<String>) -> Self {
        ProviderOptions {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Per-request timeout. Without it, a request blocks until the transport resolves or fails.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client, e.g. to share a connection pool or set up TLS.
    ///
    /// When set, [`ProviderOptions::timeout`] is ignored: configure it on the client instead.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Create a new [`GoFeatureFlagProvider`] using these options.
    pub fn to_provider(self) -> Result<GoFeatureFlagProvider> {
        GoFeatureFlagProvider::new(self)
    }

    /// Parse and check the endpoint: it must be an absolute `http(s)` URL with a host.
    pub(crate) fn validated_endpoint(&self) -> Result<Url> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::MissingEndpoint);
        }

        let url = Url::parse(endpoint).map_err(Error::InvalidEndpoint)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme(url.scheme().to_owned()));
        }
        match url.host() {
            None => return Err(Error::InvalidEndpoint(url::ParseError::EmptyHost)),
            // WHATWG parsing tolerates characters that are not valid in DNS names.
            Some(Host::Domain(domain))
                if !domain
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_')) =>
            {
                return Err(Error::InvalidEndpoint(
                    url::ParseError::InvalidDomainCharacter,
                ))
            }
            Some(_) => {}
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::ProviderOptions;

    #[test]
    fn default_options_have_no_endpoint() {
        assert!(matches!(
            ProviderOptions::default().validated_endpoint(),
            Err(Error::MissingEndpoint)
        ));
    }

    #[test]
    fn empty_endpoint() {
        assert!(matches!(
            ProviderOptions::from_endpoint("").validated_endpoint(),
            Err(Error::MissingEndpoint)
        ));
    }

    #[test]
    fn relative_endpoint() {
        assert!(matches!(
            ProviderOptions::from_endpoint("relay/v1").validated_endpoint(),
            Err(Error::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn malformed_endpoint() {
        assert!(matches!(
            ProviderOptions::from_endpoint("http:/invalid~url.com").validated_endpoint(),
            Err(Error::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn non_http_scheme() {
        assert!(matches!(
            ProviderOptions::from_endpoint("ftp://relay.example.com").validated_endpoint(),
            Err(Error::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn valid_endpoint() {
        let url = ProviderOptions::from_endpoint("https://app.gofeatureflag.org/")
            .validated_endpoint()
            .unwrap();
        assert_eq!(url.host_str(), Some("app.gofeatureflag.org"));
    }
}
