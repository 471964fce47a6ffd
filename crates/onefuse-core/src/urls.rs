//! Collection, item and relation URL construction.

use url::Url;

use crate::config::ConnectionConfig;
use crate::query::Filter;
use crate::types::{ResourceKind, API_NAMESPACE, API_ROOT};

/// Builds every URL the client addresses from the connection's base URL.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
}

impl UrlBuilder {
    /// Create a builder for the connection's `scheme://host:port/`.
    #[must_use]
    pub fn new(config: &ConnectionConfig) -> Self {
        Self {
            base: config.base_url().clone(),
        }
    }

    /// `scheme://host:port/api/v3/onefuse/<resource-type>/`
    #[must_use]
    pub fn collection(&self, kind: ResourceKind) -> Url {
        let mut url = self.base.clone();
        url.set_path(&collection_path(kind));
        url
    }

    /// Collection URL with a `filter=` query parameter.
    #[must_use]
    pub fn filtered_collection(&self, kind: ResourceKind, filter: &Filter) -> Url {
        let mut url = self.collection(kind);
        url.query_pairs_mut().append_pair("filter", &filter.to_string());
        url
    }

    /// `scheme://host:port/api/v3/onefuse/<resource-type>/<id>/`
    #[must_use]
    pub fn item(&self, kind: ResourceKind, id: impl Into<u64>) -> Url {
        let mut url = self.base.clone();
        url.set_path(&item_href(kind, id));
        url
    }
}

/// Server-relative collection path, `/api/v3/onefuse/<resource-type>/`.
#[must_use]
pub fn collection_path(kind: ResourceKind) -> String {
    format!("{API_ROOT}{API_NAMESPACE}/{}/", kind.resource_type())
}

/// Server-relative item path used as a relation value in request payloads,
/// `/api/v3/onefuse/<resource-type>/<id>/`.
#[must_use]
pub fn item_href(kind: ResourceKind, id: impl Into<u64>) -> String {
    format!("{}{}/", collection_path(kind), id.into())
}
