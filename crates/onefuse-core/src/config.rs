//! Connection context for a OneFuse endpoint.
//!
//! A [`ConnectionConfig`] is built once, validated, and then shared read-only
//! by every request issued through a client.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default value of the client-identification `SOURCE` header.
pub const DEFAULT_SOURCE: &str = "onefuse-rust";

/// URL scheme used to reach the OneFuse server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain HTTP
    Http,
    /// HTTP over TLS
    Https,
}

impl Scheme {
    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(Error::ConfigError(format!("Unknown scheme: {s}"))),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection context for a OneFuse server.
///
/// Holds the endpoint address, the credentials sent as HTTP Basic auth on
/// every request and the TLS verification flag. The password is kept in a
/// [`SecretString`] and is redacted from `Debug` output.
#[derive(Debug, Validate)]
pub struct ConnectionConfig {
    scheme: Scheme,

    #[validate(length(min = 1, message = "host must not be empty"))]
    host: String,

    #[validate(range(min = 1, message = "port must be non-zero"))]
    port: u16,

    #[validate(length(min = 1, message = "username must not be empty"))]
    username: String,

    password: SecretString,

    tls_verify: bool,

    timeout: Option<Duration>,

    #[validate(length(min = 1, message = "source marker must not be empty"))]
    source: String,

    base_url: Url,
}

impl ConnectionConfig {
    /// Create a new connection context.
    ///
    /// TLS verification defaults to enabled and no request timeout is applied
    /// beyond the transport's own defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a field is empty or the resulting
    /// base URL cannot be parsed.
    pub fn new(
        scheme: Scheme,
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let host = host.into();
        let base_url = Url::parse(&format!("{scheme}://{host}:{port}/"))?;

        let config = Self {
            scheme,
            host,
            port,
            username: username.into(),
            password: SecretString::from(password.into()),
            tls_verify: true,
            timeout: None,
            source: DEFAULT_SOURCE.to_string(),
            base_url,
        };

        config.validate()?;
        Ok(config)
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the value of the `SOURCE` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the marker is empty.
    pub fn with_source(mut self, source: impl Into<String>) -> Result<Self, Error> {
        self.source = source.into();
        self.validate()?;
        Ok(self)
    }

    /// URL scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Server host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Value for the `Host` header, `host:port`.
    #[must_use]
    pub fn host_header(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Basic auth user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Basic auth password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub const fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    /// Per-request timeout, if one was configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Value of the client-identification `SOURCE` header.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// `scheme://host:port/` with no API path.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}
