//! Strongly-typed identifiers for OneFuse resources.
//!
//! The server assigns plain positive integers to every record. Wrapping them
//! per resource kind keeps a workspace id from being passed where an endpoint
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::links::{parse_link_id, LinkRef};

/// Macro to generate strongly-typed identifier wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// Returns true for the zero value the server never assigns.
            #[must_use]
            pub const fn is_unset(&self) -> bool {
                self.0 == 0
            }

            /// Parses an identifier from a decimal string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not an unsigned integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                input
                    .trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| Error::Validation(format!(
                        "invalid {}: `{input}`",
                        stringify!($name)
                    )))
            }

            /// Extracts the identifier from a hypermedia link.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidLink`] if the href does not end in `<id>/`.
            pub fn from_link(link: &LinkRef) -> Result<Self> {
                parse_link_id(&link.href).map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(WorkspaceId, "Workspace identifier");
id_type!(NamingPolicyId, "Naming policy identifier");
id_type!(CustomNameId, "Naming reservation (custom name) identifier");
id_type!(MicrosoftAdPolicyId, "Microsoft AD (directory-join) policy identifier");
id_type!(EndpointId, "Connection endpoint identifier");
