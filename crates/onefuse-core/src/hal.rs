//! HAL envelope decoding.
//!
//! Collections arrive as `{"_embedded": {"<rel>": [record, ...]}}`. Single
//! records are plain objects with an optional `_links` block.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A HAL collection response.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(rename = "_embedded", default = "BTreeMap::new")]
    embedded: BTreeMap<String, Vec<T>>,
}

impl<T> Collection<T> {
    /// Takes the records embedded under `rel`; missing relations yield an empty list.
    #[must_use]
    pub fn into_items(mut self, rel: &str) -> Vec<T> {
        self.embedded.remove(rel).unwrap_or_default()
    }
}

/// Decodes a response body into `T`.
///
/// Missing fields fall back to their defaults where the record type allows
/// it; a body whose top-level shape does not match is a [`Error::Decode`].
///
/// # Errors
///
/// Returns [`Error::Decode`] naming `operation` and `url`.
pub fn decode<T>(operation: &str, url: &str, body: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|err| Error::Decode {
        operation: operation.to_string(),
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Field deserializer that maps `null` or a mistyped value to `T::default()`.
///
/// Record fields use it together with `#[serde(default)]` so one bad member
/// leaves that field at its zero value instead of failing the whole record.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Encodes a request payload.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the payload cannot be serialized.
pub fn encode<T>(operation: &str, payload: &T) -> Result<String>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_string(payload).map_err(|err| {
        Error::Validation(format!("{operation}: unable to encode request body: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        #[serde(default)]
        id: u64,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn collection_items_by_rel() {
        let body = json!({
            "_embedded": {
                "workspaces": [
                    {"id": 3, "name": "Default"},
                    {"id": 4, "name": "Other"}
                ]
            }
        })
        .to_string();

        let collection: Collection<Named> = decode("list", "u", &body).unwrap();
        let items = collection.into_items("workspaces");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Default");
    }

    #[test]
    fn collection_without_embedded_is_empty() {
        let collection: Collection<Named> = decode("list", "u", r#"{"count": 0}"#).unwrap();
        assert!(collection.into_items("workspaces").is_empty());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let named: Named = decode("get", "u", r#"{"name": "ad01"}"#).unwrap();
        assert_eq!(named, Named { id: 0, name: "ad01".to_string() });
    }

    #[test]
    fn mismatched_top_level_is_decode_error() {
        let err = decode::<Named>("get_custom_name", "http://h/x/", "[1, 2]").unwrap_err();
        match err {
            Error::Decode { operation, url, .. } => {
                assert_eq!(operation, "get_custom_name");
                assert_eq!(url, "http://h/x/");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(decode::<Named>("get", "u", "<html>").is_err());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tolerant {
        #[serde(default, deserialize_with = "lenient")]
        port: u16,
        #[serde(default, deserialize_with = "lenient")]
        ou: String,
        #[serde(default, deserialize_with = "lenient")]
        ssl: bool,
    }

    #[test]
    fn lenient_fields_fall_back_to_zero_values() {
        let tolerant: Tolerant =
            decode("get", "u", r#"{"port": "636", "ou": null, "ssl": true}"#).unwrap();
        assert_eq!(
            tolerant,
            Tolerant {
                port: 0,
                ou: String::new(),
                ssl: true
            }
        );

        let tolerant: Tolerant = decode("get", "u", r#"{"port": 70000, "ou": 5}"#).unwrap();
        assert_eq!(tolerant.port, 0);
        assert_eq!(tolerant.ou, "");
    }

    #[test]
    fn lenient_fields_keep_valid_values() {
        let tolerant: Tolerant =
            decode("get", "u", r#"{"port": 636, "ou": "OU=Servers"}"#).unwrap();
        assert_eq!(tolerant.port, 636);
        assert_eq!(tolerant.ou, "OU=Servers");
    }

    #[test]
    fn encode_payload() {
        let body = encode("create", &json!({"name": "ad01"})).unwrap();
        assert_eq!(body, r#"{"name":"ad01"}"#);
    }
}
