//! Naming reservations (`customNames`).

use onefuse_core::client::ApiClient;
use onefuse_core::hal;
use onefuse_core::ids::CustomNameId;
use onefuse_core::types::ResourceKind;
use onefuse_core::{Error, Result};
use reqwest::Method;
use tracing::info;

use crate::models::{CustomName, CustomNamePayload, GenerateCustomName};
use crate::workspace::Workspaces;

/// Generate, read and release naming reservations.
#[derive(Debug, Clone, Copy)]
pub struct CustomNames<'a> {
    api: &'a ApiClient,
}

impl<'a> CustomNames<'a> {
    pub(crate) const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Reserve a name from a naming policy.
    ///
    /// When the request carries no workspace the `Default` workspace is
    /// looked up first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unset naming policy id,
    /// [`Error::NoDefaultWorkspace`] if the fallback lookup finds nothing,
    /// otherwise any request, status or decode error.
    pub async fn generate(&self, request: &GenerateCustomName) -> Result<CustomName> {
        if request.naming_policy_id.is_unset() {
            return Err(Error::Validation(
                "generating a custom name requires a naming policy".to_string(),
            ));
        }

        let workspace_id = Workspaces::new(self.api)
            .resolve(request.workspace_id)
            .await?;

        let operation = "generate_custom_name";
        let body = hal::encode(operation, &CustomNamePayload::new(request, workspace_id))?;
        let url = self.api.urls().collection(ResourceKind::CustomName);

        let name: CustomName = self
            .api
            .send_json(operation, Method::POST, url, Some(body))
            .await?;

        info!(
            custom_name_id = %name.id,
            name = %name.name,
            dns_suffix = %name.dns_suffix,
            "Custom name reserved"
        );
        Ok(name)
    }

    /// Fetch a naming reservation by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unset id, otherwise any request,
    /// status or decode error.
    pub async fn get(&self, id: CustomNameId) -> Result<CustomName> {
        require_id(id, "reading")?;
        let url = self.api.urls().item(ResourceKind::CustomName, id);
        self.api
            .send_json("get_custom_name", Method::GET, url, None)
            .await
    }

    /// Release a naming reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unset id, otherwise any request or
    /// status error.
    pub async fn delete(&self, id: CustomNameId) -> Result<()> {
        require_id(id, "deleting")?;
        let url = self.api.urls().item(ResourceKind::CustomName, id);
        self.api
            .send("delete_custom_name", Method::DELETE, url, None)
            .await
            .map(|_| ())
    }
}

fn require_id(id: CustomNameId, action: &str) -> Result<()> {
    if id.is_unset() {
        return Err(Error::Validation(format!(
            "{action} a custom name requires an identifier"
        )));
    }
    Ok(())
}
