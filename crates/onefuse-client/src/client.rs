//! Asynchronous OneFuse resource client.

use crate::ad_policy::MicrosoftAdPolicies;
use crate::endpoint::MicrosoftEndpoints;
use crate::naming::CustomNames;
use crate::workspace::Workspaces;
use crate::Result;
use onefuse_core::client::{ApiClient, ApiClientBuilder, ClientConfig};
use onefuse_core::config::ConnectionConfig;
use onefuse_core::types::{Operation, ResourceKind};
use onefuse_core::Error;
use reqwest::Method;
use tracing::info;

const USER_AGENT: &str = concat!("onefuse-client/", env!("CARGO_PKG_VERSION"));

/// Builder for [`OneFuseClient`].
#[derive(Debug)]
pub struct OneFuseClientBuilder {
    inner: ApiClientBuilder,
}

impl OneFuseClientBuilder {
    /// Create a builder for the given connection.
    #[must_use]
    pub fn new(connection: ConnectionConfig) -> Self {
        Self {
            inner: ApiClientBuilder::new(connection).with_user_agent(USER_AGENT),
        }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner = self.inner.with_user_agent(user_agent);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<OneFuseClient> {
        let inner = self.inner.build()?;
        Ok(OneFuseClient { inner })
    }
}

/// Asynchronous OneFuse client.
///
/// Resource operations hang off per-kind handles; each handle only offers the
/// operations its kind supports.
#[derive(Debug, Clone)]
pub struct OneFuseClient {
    inner: ApiClient,
}

impl OneFuseClient {
    /// Construct a client with default transport settings.
    ///
    /// # Errors
    ///
    /// See [`OneFuseClientBuilder::build`].
    pub fn new(connection: ConnectionConfig) -> Result<Self> {
        OneFuseClientBuilder::new(connection).build()
    }

    /// Start a builder for the given connection.
    #[must_use]
    pub fn builder(connection: ConnectionConfig) -> OneFuseClientBuilder {
        OneFuseClientBuilder::new(connection)
    }

    /// Connection context the client was built with.
    #[must_use]
    pub fn connection(&self) -> &ConnectionConfig {
        self.inner.connection()
    }

    /// Naming reservations.
    #[must_use]
    pub const fn custom_names(&self) -> CustomNames<'_> {
        CustomNames::new(&self.inner)
    }

    /// Directory-join policies.
    #[must_use]
    pub const fn ad_policies(&self) -> MicrosoftAdPolicies<'_> {
        MicrosoftAdPolicies::new(&self.inner)
    }

    /// Microsoft connection endpoints.
    #[must_use]
    pub const fn microsoft_endpoints(&self) -> MicrosoftEndpoints<'_> {
        MicrosoftEndpoints::new(&self.inner)
    }

    /// Workspaces.
    #[must_use]
    pub const fn workspaces(&self) -> Workspaces<'_> {
        Workspaces::new(&self.inner)
    }

    /// Delete a resource chosen at runtime.
    ///
    /// Kinds that cannot be deleted fail with [`Error::NotImplemented`]
    /// before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotImplemented`] for unsupported kinds,
    /// [`Error::Validation`] for a zero id, otherwise any request or status
    /// error.
    pub async fn delete_resource(&self, kind: ResourceKind, id: u64) -> Result<()> {
        kind.ensure_supported(Operation::Delete)?;
        if id == 0 {
            return Err(Error::Validation(format!(
                "deleting a {kind} requires an identifier"
            )));
        }

        let operation = format!("delete_{}", kind.resource_type());
        let url = self.inner.urls().item(kind, id);
        self.inner
            .send(&operation, Method::DELETE, url, None)
            .await?;

        info!(kind = %kind, id, "Resource deleted");
        Ok(())
    }
}
