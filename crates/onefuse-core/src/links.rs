//! Hypermedia link references.
//!
//! Records returned by the API carry a `_links` object whose members are
//! `{href, title}` pairs keyed by relation name. The client only uses them to
//! recover the numeric identifier of the related resource.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// A single `{href, title}` entry from a `_links` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Target URL, absolute or server-relative.
    #[serde(default, deserialize_with = "crate::hal::lenient")]
    pub href: String,
    /// Display title of the target.
    #[serde(
        default,
        deserialize_with = "crate::hal::lenient",
        skip_serializing_if = "String::is_empty"
    )]
    pub title: String,
}

impl LinkRef {
    /// Create a link reference.
    #[must_use]
    pub fn new(href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: title.into(),
        }
    }

    /// Extracts the identifier of the linked resource.
    ///
    /// # Errors
    ///
    /// See [`parse_link_id`].
    pub fn id(&self) -> Result<u64> {
        parse_link_id(&self.href)
    }
}

/// Extracts the trailing numeric identifier from a link of the shape
/// `.../<resource-type>/<id>/`.
///
/// The path is split on `/` and the piece before the last one is taken; for a
/// trailing-slash href the last piece is empty, so this is the identifier.
/// Query strings and fragments are ignored.
///
/// # Errors
///
/// Returns [`Error::InvalidLink`] if the path has fewer than two pieces or
/// the selected piece is not an unsigned integer. An href without the
/// trailing slash therefore fails instead of yielding the collection name.
pub fn parse_link_id(href: &str) -> Result<u64> {
    let path = link_path(href);
    let segments: Vec<&str> = path.split('/').collect();

    if segments.len() < 2 {
        return Err(invalid(href, "expected at least two path segments"));
    }

    let candidate = segments[segments.len() - 2];
    if candidate.is_empty() {
        return Err(invalid(href, "identifier segment is empty"));
    }

    candidate
        .parse::<u64>()
        .map_err(|_| invalid(href, &format!("`{candidate}` is not a numeric identifier")))
}

fn link_path(href: &str) -> String {
    if let Ok(url) = Url::parse(href) {
        return url.path().to_string();
    }

    let end = href.find(|c: char| c == '?' || c == '#').unwrap_or(href.len());
    href[..end].to_string()
}

fn invalid(href: &str, reason: &str) -> Error {
    Error::InvalidLink {
        href: href.to_string(),
        reason: reason.to_string(),
    }
}
