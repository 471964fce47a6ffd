//! Microsoft connection endpoints.
//!
//! Endpoints are provisioned outside this client; the handle only reads them.

use onefuse_core::client::ApiClient;
use onefuse_core::hal::Collection;
use onefuse_core::ids::EndpointId;
use onefuse_core::query::Filter;
use onefuse_core::types::ResourceKind;
use onefuse_core::{Error, Result};
use reqwest::Method;
use tracing::debug;

use crate::models::MicrosoftEndpoint;

/// Type discriminator of Microsoft endpoints.
pub const MICROSOFT_ENDPOINT_TYPE: &str = "microsoft";

/// Read access to Microsoft endpoints.
#[derive(Debug, Clone, Copy)]
pub struct MicrosoftEndpoints<'a> {
    api: &'a ApiClient,
}

impl<'a> MicrosoftEndpoints<'a> {
    pub(crate) const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Fetch an endpoint by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unset id, otherwise any request,
    /// status or decode error.
    pub async fn get(&self, id: EndpointId) -> Result<MicrosoftEndpoint> {
        if id.is_unset() {
            return Err(Error::Validation(
                "reading an endpoint requires an identifier".to_string(),
            ));
        }

        let url = self.api.urls().item(ResourceKind::Endpoint, id);
        self.api
            .send_json("get_microsoft_endpoint", Method::GET, url, None)
            .await
    }

    /// Find the Microsoft endpoint with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] without a request if `name` contains `;`
    /// or `:`, [`Error::NotFound`] when no endpoint matches, otherwise any
    /// request, status or decode error.
    pub async fn find_by_name(&self, name: &str) -> Result<MicrosoftEndpoint> {
        let filter = Filter::new()
            .matches("name", name)?
            .matches("type", MICROSOFT_ENDPOINT_TYPE)?;
        let url = self
            .api
            .urls()
            .filtered_collection(ResourceKind::Endpoint, &filter);

        let collection: Collection<MicrosoftEndpoint> = self
            .api
            .send_json("find_microsoft_endpoint", Method::GET, url, None)
            .await?;
        let mut endpoints = collection.into_items(ResourceKind::Endpoint.embedded_rel());
        debug!(name, matches = endpoints.len(), "Endpoint lookup");

        if endpoints.is_empty() {
            return Err(Error::NotFound(format!(
                "Microsoft endpoint named `{name}`"
            )));
        }
        Ok(endpoints.swap_remove(0))
    }
}
