//! Request executor and response classifier.
//!
//! [`ApiClient`] performs exactly one HTTP round trip per call with the
//! standard OneFuse headers and HTTP Basic credentials. [`classify`] turns a
//! response with an error status into an [`Error`] carrying the body text.
//! No retries are performed for any error kind.

use reqwest::header::{ACCEPT, CACHE_CONTROL, CONNECTION, CONTENT_TYPE, HOST};
use reqwest::{Client, ClientBuilder, Method, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::hal;
use crate::urls::UrlBuilder;

/// Name of the client-identification header.
pub const SOURCE_HEADER: &str = "SOURCE";

const USER_AGENT: &str = concat!("onefuse-rust/", env!("CARGO_PKG_VERSION"));

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP transport configuration.
///
/// Per-request deadlines belong to [`ConnectionConfig`]; this only tunes the
/// connection pool shared by all requests of one client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Timeout for establishing a connection
    pub connect_timeout: Option<Duration>,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            connect_timeout: None,
            enable_compression: true,
        }
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    connection: ConnectionConfig,
    http_config: ClientConfig,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Create a builder for the given connection.
    #[must_use]
    pub fn new(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            http_config: ClientConfig::new(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the HTTP transport configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the underlying HTTP client cannot be built.
    pub fn build(self) -> Result<ApiClient> {
        let mut builder = ClientBuilder::new()
            .user_agent(&self.user_agent)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .gzip(self.http_config.enable_compression);

        if let Some(timeout) = self.http_config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if !self.connection.tls_verify() {
            warn!(host = %self.connection.host(), "TLS verification disabled for OneFuse client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build OneFuse HTTP client: {err}"))
        })?;

        let urls = UrlBuilder::new(&self.connection);

        Ok(ApiClient {
            http,
            connection: Arc::new(self.connection),
            urls,
        })
    }
}

/// Executes requests against one OneFuse server.
///
/// Cheap to clone; clones share the connection pool and the immutable
/// connection context.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    connection: Arc<ConnectionConfig>,
    urls: UrlBuilder,
}

impl ApiClient {
    /// Construct a client with default transport settings.
    ///
    /// # Errors
    ///
    /// See [`ApiClientBuilder::build`].
    pub fn new(connection: ConnectionConfig) -> Result<Self> {
        ApiClientBuilder::new(connection).build()
    }

    /// Start a builder for the given connection.
    #[must_use]
    pub fn builder(connection: ConnectionConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(connection)
    }

    /// The connection context every request is issued with.
    #[must_use]
    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// URL builder bound to this connection.
    #[must_use]
    pub const fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Issues a single request and returns the raw response.
    ///
    /// The response status is not inspected; see [`classify`].
    ///
    /// # Errors
    ///
    /// Returns a transport error ([`Error::Timeout`], [`Error::ConnectionFailed`]
    /// or [`Error::Transport`]) if no response was received.
    pub async fn execute(
        &self,
        operation: &str,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<Response> {
        let connection = &self.connection;

        info!(operation, method = %method, url = %url, "Sending OneFuse request");

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "*/*")
            .header(CACHE_CONTROL, "no-cache")
            .header(CONNECTION, "keep-alive")
            .header(HOST, connection.host_header())
            .header(SOURCE_HEADER, connection.source())
            .basic_auth(connection.username(), Some(connection.password()));

        if let Some(timeout) = connection.timeout() {
            request = request.timeout(timeout);
        }

        if let Some(payload) = body {
            debug!(operation, payload = %payload, "OneFuse request body");
            request = request.body(payload);
        }

        let response = request.send().await.map_err(|err| {
            warn!(operation, error = %err, "OneFuse request failed");
            Error::from(err)
        })?;

        debug!(operation, status = response.status().as_u16(), "OneFuse response received");
        Ok(response)
    }

    /// Executes a request and classifies the response.
    ///
    /// # Errors
    ///
    /// Transport errors from [`ApiClient::execute`] and status errors from
    /// [`classify`].
    pub async fn send(
        &self,
        operation: &str,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<Response> {
        let response = self.execute(operation, method, url, body).await?;
        classify(operation, response).await
    }

    /// Executes a request, classifies the response and decodes its body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`Error::Decode`] if the body does not
    /// decode into `T`.
    pub async fn send_json<T>(
        &self,
        operation: &str,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url_text = url.to_string();
        let response = self.send(operation, method, url, body).await?;
        let text = response.text().await.map_err(|err| Error::Decode {
            operation: operation.to_string(),
            url: url_text.clone(),
            message: format!("unable to read response body: {err}"),
        })?;

        debug!(operation, body = %text, "OneFuse response body");
        hal::decode(operation, &url_text, &text)
    }
}

/// Classifies a response by status.
///
/// Status `>= 500` is a [`Error::ServerError`], `>= 400` a
/// [`Error::ClientError`]; both consume the body into the error detail.
/// Anything below 400 is returned with its body unread.
///
/// # Errors
///
/// Returns the status error described above.
pub async fn classify(operation: &str, response: Response) -> Result<Response> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|err| format!("<unreadable response body: {err}>"));

    warn!(operation, status, url = %url, "OneFuse request rejected");

    if status >= 500 {
        Err(Error::ServerError {
            operation: operation.to_string(),
            url,
            status,
            body,
        })
    } else {
        Err(Error::ClientError {
            operation: operation.to_string(),
            url,
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scheme;
    use crate::types::ResourceKind;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ApiClient {
        let address = server.address();
        let connection = ConnectionConfig::new(
            Scheme::Http,
            address.ip().to_string(),
            address.port(),
            "admin",
            "secret",
        )
        .unwrap();
        ApiClient::new(connection).unwrap()
    }

    #[tokio::test]
    async fn execute_sends_standard_headers() {
        let server = MockServer::start().await;
        let client = test_client(&server);
        let host = client.connection().host_header();

        Mock::given(method("GET"))
            .and(path("/api/v3/onefuse/workspaces/1/"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "*/*"))
            .and(header("cache-control", "no-cache"))
            .and(header("host", host.as_str()))
            .and(header("SOURCE", "onefuse-rust"))
            .and(basic_auth("admin", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let url = client.urls().item(ResourceKind::Workspace, 1_u64);
        let response = client
            .execute("get_workspace", Method::GET, url, None)
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn execute_sends_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/onefuse/customNames/"))
            .and(body_json(json!({"namingPolicy": "/api/v3/onefuse/namingPolicies/1/"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = client.urls().collection(ResourceKind::CustomName);
        let body = json!({"namingPolicy": "/api/v3/onefuse/namingPolicies/1/"}).to_string();
        client
            .send("generate_custom_name", Method::POST, url, Some(body))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn classify_not_found_is_client_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = client.urls().item(ResourceKind::CustomName, 9_u64);
        let response = client
            .execute("get_custom_name", Method::GET, url, None)
            .await
            .unwrap();

        let err = classify("get_custom_name", response).await.unwrap_err();
        match &err {
            Error::ClientError {
                operation,
                url,
                status,
                body,
            } => {
                assert_eq!(operation, "get_custom_name");
                assert!(url.ends_with("/api/v3/onefuse/customNames/9/"));
                assert_eq!(*status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn classify_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = client.urls().item(ResourceKind::MicrosoftAdPolicy, 2_u64);
        let err = client
            .send("delete_microsoft_ad_policy", Method::DELETE, url, None)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(err.body(), Some("maintenance"));
        assert!(matches!(err, Error::ServerError { .. }));
    }

    #[tokio::test]
    async fn classify_success_leaves_body_readable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": 5}"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = client.urls().item(ResourceKind::Workspace, 5_u64);
        let response = client
            .execute("get_workspace", Method::GET, url, None)
            .await
            .unwrap();

        let response = classify("get_workspace", response).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "{\"id\": 5}");
    }

    #[tokio::test]
    async fn send_json_reports_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = client.urls().item(ResourceKind::Workspace, 5_u64);
        let err = client
            .send_json::<serde_json::Value>("get_workspace", Method::GET, url, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let connection =
            ConnectionConfig::new(Scheme::Http, "127.0.0.1", 1, "admin", "secret").unwrap();
        let client = ApiClient::new(connection).unwrap();
        let url = client.urls().collection(ResourceKind::Workspace);

        let err = client
            .execute("list_workspaces", Method::GET, url, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ConnectionFailed(_) | Error::Transport(_) | Error::Timeout(_)
        ));
    }

    #[test]
    fn client_config_builder() {
        let config = ClientConfig::new()
            .with_pool_idle_timeout(Duration::from_secs(120))
            .with_pool_max_idle(20)
            .with_connect_timeout(Duration::from_secs(5))
            .with_compression(false);

        assert_eq!(config.pool_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.pool_max_idle_per_host, 20);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
        assert!(!config.enable_compression);
    }

    #[test]
    fn client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(
            config.pool_idle_timeout,
            Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT)
        );
        assert_eq!(config.pool_max_idle_per_host, DEFAULT_POOL_MAX_IDLE_PER_HOST);
        assert!(config.enable_compression);
    }
}
