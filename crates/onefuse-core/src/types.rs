//! Resource kinds exposed by the OneFuse API.
//!
//! Each [`ResourceKind`] knows its collection name in the URL space, the
//! relation name used for its array inside a HAL `_embedded` block, and which
//! [`Operation`]s this client supports for it.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// API version prefix.
pub const API_ROOT: &str = "/api/v3/";
/// API namespace under the version prefix.
pub const API_NAMESPACE: &str = "onefuse";
/// Name of the implicit workspace used when none is given.
pub const DEFAULT_WORKSPACE_NAME: &str = "Default";

/// Resource kinds known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Logical workspace (tenant boundary)
    Workspace,
    /// Naming policy referenced by name reservations
    NamingPolicy,
    /// Naming reservation (`customNames`)
    CustomName,
    /// Directory-join policy for Microsoft AD
    MicrosoftAdPolicy,
    /// Connection endpoint
    Endpoint,
}

/// Operations a resource kind may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// POST to the collection
    Create,
    /// GET an item
    Read,
    /// PUT an item
    Update,
    /// DELETE an item
    Delete,
    /// GET the collection with a `filter=` expression
    List,
}

impl ResourceKind {
    /// Returns the collection segment used in URLs.
    #[must_use]
    pub const fn resource_type(&self) -> &'static str {
        match self {
            Self::Workspace => "workspaces",
            Self::NamingPolicy => "namingPolicies",
            Self::CustomName => "customNames",
            Self::MicrosoftAdPolicy => "microsoftADPolicies",
            Self::Endpoint => "endpoints",
        }
    }

    /// Returns the key of the record array inside a collection's `_embedded` block.
    #[must_use]
    pub const fn embedded_rel(&self) -> &'static str {
        self.resource_type()
    }

    /// Returns all resource kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Workspace,
            Self::NamingPolicy,
            Self::CustomName,
            Self::MicrosoftAdPolicy,
            Self::Endpoint,
        ]
    }

    /// Returns the operations this client supports for the kind.
    #[must_use]
    pub const fn operations(&self) -> &'static [Operation] {
        match self {
            Self::Workspace => &[Operation::Read, Operation::List],
            Self::NamingPolicy => &[],
            Self::CustomName => &[Operation::Create, Operation::Read, Operation::Delete],
            Self::MicrosoftAdPolicy => &[
                Operation::Create,
                Operation::Read,
                Operation::Update,
                Operation::Delete,
            ],
            Self::Endpoint => &[Operation::Read, Operation::List],
        }
    }

    /// Returns true if the kind supports `operation`.
    #[must_use]
    pub fn supports(&self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }

    /// Fails with [`Error::NotImplemented`] if the kind does not support `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotImplemented`] naming the kind and operation.
    pub fn ensure_supported(&self, operation: Operation) -> Result<()> {
        if self.supports(operation) {
            Ok(())
        } else {
            Err(Error::NotImplemented(format!(
                "{operation} is not supported for {self}"
            )))
        }
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.resource_type().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("Unknown resource type: {s}")))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_type())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        };
        f.write_str(name)
    }
}
