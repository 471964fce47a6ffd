//! Workspace lookups and default-workspace resolution.

use onefuse_core::client::ApiClient;
use onefuse_core::hal::Collection;
use onefuse_core::ids::WorkspaceId;
use onefuse_core::query::Filter;
use onefuse_core::types::{ResourceKind, DEFAULT_WORKSPACE_NAME};
use onefuse_core::{Error, Result};
use reqwest::Method;
use tracing::{debug, warn};

use crate::models::Workspace;

/// Read-only access to workspaces.
#[derive(Debug, Clone, Copy)]
pub struct Workspaces<'a> {
    api: &'a ApiClient,
}

impl<'a> Workspaces<'a> {
    pub(crate) const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Fetch a workspace by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an unset id, otherwise any request,
    /// status or decode error.
    pub async fn get(&self, id: WorkspaceId) -> Result<Workspace> {
        if id.is_unset() {
            return Err(Error::Validation(
                "reading a workspace requires an identifier".to_string(),
            ));
        }

        let url = self.api.urls().item(ResourceKind::Workspace, id);
        self.api
            .send_json("get_workspace", Method::GET, url, None)
            .await
    }

    /// List workspaces whose name matches `name` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `name` contains a filter separator,
    /// otherwise any request, status or decode error.
    pub async fn list_by_name(&self, name: &str) -> Result<Vec<Workspace>> {
        let filter = Filter::new().exact("name", name)?;
        let url = self
            .api
            .urls()
            .filtered_collection(ResourceKind::Workspace, &filter);

        let collection: Collection<Workspace> = self
            .api
            .send_json("list_workspaces", Method::GET, url, None)
            .await?;

        Ok(collection.into_items(ResourceKind::Workspace.embedded_rel()))
    }

    /// Identifier of the workspace named `Default`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDefaultWorkspace`] if the filtered list is empty or
    /// its first record carries no identifier.
    pub async fn default_workspace_id(&self) -> Result<WorkspaceId> {
        let workspaces = self.list_by_name(DEFAULT_WORKSPACE_NAME).await?;
        let workspace = workspaces.first().ok_or(Error::NoDefaultWorkspace)?;
        if workspace.id.is_unset() {
            warn!(name = %workspace.name, "Default workspace record has no identifier");
            return Err(Error::NoDefaultWorkspace);
        }

        debug!(workspace_id = %workspace.id, "Resolved default workspace");
        Ok(workspace.id)
    }

    /// Returns `explicit` when given, otherwise looks up the default workspace.
    ///
    /// The lookup is issued only when no workspace was supplied.
    ///
    /// # Errors
    ///
    /// See [`Workspaces::default_workspace_id`].
    pub async fn resolve(&self, explicit: Option<WorkspaceId>) -> Result<WorkspaceId> {
        match explicit {
            Some(id) if !id.is_unset() => Ok(id),
            _ => {
                warn!("No workspace supplied, resolving the Default workspace");
                self.default_workspace_id().await
            }
        }
    }
}
