//! OneFuse resource client.
//!
//! Typed handles for naming reservations, Microsoft AD join policies,
//! Microsoft endpoints and workspaces, built on the transport in
//! [`onefuse_core`].

#![deny(missing_docs)]

pub mod ad_policy;
pub mod client;
pub mod endpoint;
pub mod models;
pub mod naming;
pub mod workspace;

pub use ad_policy::MicrosoftAdPolicies;
pub use client::{OneFuseClient, OneFuseClientBuilder};
pub use endpoint::MicrosoftEndpoints;
pub use models::{
    CustomName, EndpointLinks, GenerateCustomName, LetterCase, MicrosoftAdPolicy,
    MicrosoftAdPolicySpec, MicrosoftEndpoint, Workspace, WorkspaceLinks,
};
pub use naming::CustomNames;
pub use workspace::Workspaces;

/// Convenient result alias that reuses the shared OneFuse error type.
pub type Result<T> = onefuse_core::Result<T>;
