//! OneFuse resource records and their wire mappings.
//!
//! Each resource kind has one declarative serde mapping for what the server
//! returns and, where the client writes it, one for the request payload.
//! Relations are sent as server-relative hrefs and come back as `_links`;
//! caller-facing records expose them as typed identifiers.

use onefuse_core::ids::{CustomNameId, EndpointId, MicrosoftAdPolicyId, NamingPolicyId, WorkspaceId};
use onefuse_core::hal::lenient;
use onefuse_core::links::LinkRef;
use onefuse_core::types::ResourceKind;
use onefuse_core::urls::item_href;
use onefuse_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workspace as returned by `/workspaces/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Hypermedia links.
    #[serde(rename = "_links", default, deserialize_with = "lenient")]
    pub links: WorkspaceLinks,
    /// Server-assigned identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: WorkspaceId,
    /// Workspace name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
}

/// `_links` block of a [`Workspace`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceLinks {
    /// Link to the workspace itself.
    #[serde(
        rename = "self",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub self_link: Option<LinkRef>,
}

/// A naming reservation (`customNames`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomName {
    /// Server-assigned identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: CustomNameId,
    /// Record version.
    #[serde(default, deserialize_with = "lenient")]
    pub version: u64,
    /// Generated name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// DNS suffix the name was generated for.
    #[serde(default, deserialize_with = "lenient")]
    pub dns_suffix: String,
}

/// Request to generate a naming reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateCustomName {
    /// Naming policy to generate the name from.
    pub naming_policy_id: NamingPolicyId,
    /// Owning workspace; the `Default` workspace is used when absent.
    pub workspace_id: Option<WorkspaceId>,
    /// Values substituted into the naming policy template.
    pub template_properties: Map<String, Value>,
}

impl GenerateCustomName {
    /// Create a request for the given naming policy.
    #[must_use]
    pub fn new(naming_policy_id: NamingPolicyId) -> Self {
        Self {
            naming_policy_id,
            workspace_id: None,
            template_properties: Map::new(),
        }
    }

    /// Set the owning workspace.
    #[must_use]
    pub fn with_workspace(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    /// Add a template property.
    #[must_use]
    pub fn with_template_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template_properties.insert(key.into(), value.into());
        self
    }
}

/// Wire payload for `POST /customNames/`.
///
/// `templateProperties` is always sent, as an empty object when there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomNamePayload {
    pub naming_policy: String,
    pub template_properties: Map<String, Value>,
    pub workspace: String,
}

impl CustomNamePayload {
    pub(crate) fn new(request: &GenerateCustomName, workspace_id: WorkspaceId) -> Self {
        Self {
            naming_policy: item_href(ResourceKind::NamingPolicy, request.naming_policy_id),
            template_properties: request.template_properties.clone(),
            workspace: item_href(ResourceKind::Workspace, workspace_id),
        }
    }
}

/// A Microsoft connection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicrosoftEndpoint {
    /// Hypermedia links.
    #[serde(rename = "_links", default, deserialize_with = "lenient")]
    pub links: EndpointLinks,
    /// Server-assigned identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: EndpointId,
    /// Endpoint type discriminator, `microsoft` for these records.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub endpoint_type: String,
    /// Endpoint name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Free-form description.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    /// Directory host.
    #[serde(default, deserialize_with = "lenient")]
    pub host: String,
    /// Directory port.
    #[serde(default, deserialize_with = "lenient")]
    pub port: u16,
    /// Whether the connection uses TLS.
    #[serde(default, deserialize_with = "lenient")]
    pub ssl: bool,
    /// Microsoft server version.
    #[serde(default, deserialize_with = "lenient")]
    pub microsoft_version: u32,
}

/// `_links` block of a [`MicrosoftEndpoint`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointLinks {
    /// Link to the endpoint itself.
    #[serde(
        rename = "self",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub self_link: Option<LinkRef>,
    /// Owning workspace.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub workspace: Option<LinkRef>,
    /// Credential used to bind to the directory.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub credential: Option<LinkRef>,
}

impl MicrosoftEndpoint {
    /// Identifier of the owning workspace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLink`] if the link is missing or malformed.
    pub fn workspace_id(&self) -> Result<WorkspaceId> {
        WorkspaceId::from_link(required_link(self.links.workspace.as_ref(), "workspace")?)
    }

    /// Identifier of the associated credential, when one is linked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLink`] if the link is present but malformed.
    pub fn credential_id(&self) -> Result<Option<u64>> {
        self.links.credential.as_ref().map(LinkRef::id).transpose()
    }
}

/// Letter case applied to computer names registered by a join policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterCase {
    /// Register names in lower case.
    Lowercase,
    /// Register names in upper case.
    Uppercase,
    /// Not set, or a value this client does not know.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl LetterCase {
    /// Returns true for [`LetterCase::Unspecified`].
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl std::str::FromStr for LetterCase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lowercase" => Ok(Self::Lowercase),
            "uppercase" => Ok(Self::Uppercase),
            _ => Err(Error::Validation(format!(
                "computer name letter case must be Lowercase or Uppercase, got `{s}`"
            ))),
        }
    }
}

/// A directory-join policy with its relations resolved to identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MicrosoftAdPolicy {
    /// Server-assigned identifier.
    pub id: MicrosoftAdPolicyId,
    /// Policy name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Letter case for registered computer names.
    pub computer_name_letter_case: LetterCase,
    /// Organizational unit path.
    pub ou: String,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Endpoint used to reach the directory.
    pub microsoft_endpoint_id: EndpointId,
}

/// Caller input for creating or updating a directory-join policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicrosoftAdPolicySpec {
    /// Policy name; required.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Endpoint used to reach the directory; required.
    pub microsoft_endpoint_id: EndpointId,
    /// Letter case for registered computer names.
    pub computer_name_letter_case: LetterCase,
    /// Organizational unit path.
    pub ou: String,
    /// Owning workspace; the `Default` workspace is used when absent.
    pub workspace_id: Option<WorkspaceId>,
}

impl MicrosoftAdPolicySpec {
    /// Create a spec with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, microsoft_endpoint_id: EndpointId) -> Self {
        Self {
            name: name.into(),
            microsoft_endpoint_id,
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the computer name letter case.
    #[must_use]
    pub const fn with_letter_case(mut self, letter_case: LetterCase) -> Self {
        self.computer_name_letter_case = letter_case;
        self
    }

    /// Set the organizational unit.
    #[must_use]
    pub fn with_ou(mut self, ou: impl Into<String>) -> Self {
        self.ou = ou.into();
        self
    }

    /// Set the owning workspace.
    #[must_use]
    pub const fn with_workspace(mut self, workspace_id: WorkspaceId) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }
}

/// Wire payload for `POST`/`PUT` on `/microsoftADPolicies/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdPolicyPayload {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub microsoft_endpoint: String,
    #[serde(skip_serializing_if = "LetterCase::is_unspecified")]
    pub computer_name_letter_case: LetterCase,
    pub workspace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ou: String,
}

impl AdPolicyPayload {
    pub(crate) fn new(spec: &MicrosoftAdPolicySpec, workspace_id: WorkspaceId) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            microsoft_endpoint: item_href(ResourceKind::Endpoint, spec.microsoft_endpoint_id),
            computer_name_letter_case: spec.computer_name_letter_case,
            workspace: item_href(ResourceKind::Workspace, workspace_id),
            ou: spec.ou.clone(),
        }
    }
}

/// A directory-join policy as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdPolicyRecord {
    #[serde(rename = "_links", default, deserialize_with = "lenient")]
    pub links: AdPolicyLinks,
    #[serde(default, deserialize_with = "lenient")]
    pub id: MicrosoftAdPolicyId,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub computer_name_letter_case: LetterCase,
    #[serde(default, deserialize_with = "lenient")]
    pub ou: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdPolicyLinks {
    #[serde(rename = "self", default, deserialize_with = "lenient")]
    pub self_link: Option<LinkRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub workspace: Option<LinkRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub microsoft_endpoint: Option<LinkRef>,
}

impl TryFrom<AdPolicyRecord> for MicrosoftAdPolicy {
    type Error = Error;

    fn try_from(record: AdPolicyRecord) -> Result<Self> {
        let workspace_id =
            WorkspaceId::from_link(required_link(record.links.workspace.as_ref(), "workspace")?)?;
        let microsoft_endpoint_id = EndpointId::from_link(required_link(
            record.links.microsoft_endpoint.as_ref(),
            "microsoftEndpoint",
        )?)?;

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            computer_name_letter_case: record.computer_name_letter_case,
            ou: record.ou,
            workspace_id,
            microsoft_endpoint_id,
        })
    }
}

fn required_link<'a>(link: Option<&'a LinkRef>, rel: &str) -> Result<&'a LinkRef> {
    link.ok_or_else(|| Error::InvalidLink {
        href: String::new(),
        reason: format!("missing `{rel}` link"),
    })
}
