use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{DocAiError, DocAiResult};

/// Environment variable holding the service URL.
pub const URL_ENV: &str = "DOCAI_URL";

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "DOCAI_TOKEN";

/// Environment variable holding the per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DOCAI_TIMEOUT";

/// Default per-request timeout. Polling waits are configured separately.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for a document-AI server.
///
/// The token is kept in a [`SecretString`] and never printed by `Debug`.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    token: SecretString,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default timeout.
    ///
    /// `base_url` may omit the scheme (`us.app.zuva.ai`), in which case
    /// `https` is used.
    pub fn new(base_url: &str, token: impl Into<String>) -> DocAiResult<Self> {
        Self::builder().base_url(base_url).token(token).build()
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Reads `DOCAI_URL`, `DOCAI_TOKEN` and, optionally, `DOCAI_TIMEOUT`.
    pub fn from_env() -> DocAiResult<Self> {
        let base_url = std::env::var(URL_ENV).map_err(|_| {
            DocAiError::invalid_argument(format!("Environment variable {URL_ENV} not set"))
        })?;
        let token = std::env::var(TOKEN_ENV).map_err(|_| {
            DocAiError::invalid_argument(format!("Environment variable {TOKEN_ENV} not set"))
        })?;

        let mut builder = Self::builder().base_url(base_url).token(token);
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                DocAiError::invalid_argument(format!(
                    "{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Full URL for a path relative to the base URL.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> DocAiResult<ClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| DocAiError::invalid_argument("base URL is required"))?;
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DocAiError::invalid_argument("token is required"))?;
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(DocAiError::invalid_argument("timeout must be positive"));
        }

        Ok(ClientConfig {
            base_url: normalize_base_url(&base_url)?,
            token: SecretString::from(token),
            timeout,
        })
    }
}

/// Parses a base URL, defaulting the scheme to `https` and dropping any
/// trailing slash from the path.
pub fn normalize_base_url(raw: &str) -> DocAiResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DocAiError::invalid_argument("base URL is empty"));
    }
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| {
        DocAiError::client_with_source(format!("Invalid base URL '{raw}'"), e)
    })?;
    if url.cannot_be_a_base() {
        return Err(DocAiError::invalid_argument(format!("Invalid base URL '{raw}'")));
    }
    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&path);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_defaults_to_https() {
        let url = normalize_base_url("us.app.zuva.ai").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("us.app.zuva.ai"));
    }

    #[test]
    fn explicit_scheme_and_port_are_kept() {
        let url = normalize_base_url("http://localhost:8080/").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn endpoint_url_joins_paths() {
        let config = ClientConfig::new("http://localhost:8080/", "my-token").unwrap();
        assert_eq!(
            config.endpoint_url("api/v2/files"),
            "http://localhost:8080/api/v2/files"
        );

        let prefixed = ClientConfig::new("https://proxy.local/docai/", "t").unwrap();
        assert_eq!(
            prefixed.endpoint_url("/api/v2/ocr"),
            "https://proxy.local/docai/api/v2/ocr"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new("us.app.zuva.ai", "super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = ClientConfig::builder()
            .base_url("us.app.zuva.ai")
            .build()
            .unwrap_err();
        assert!(matches!(err, DocAiError::InvalidArgument { .. }));

        assert!(ClientConfig::new("us.app.zuva.ai", "  ").is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ClientConfig::builder()
            .base_url("us.app.zuva.ai")
            .token("t")
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, DocAiError::InvalidArgument { .. }));
    }
}
