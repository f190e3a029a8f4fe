//! Typed view of the `olm.*` schema objects found in a rendered index.

use crate::error::ExtractError;
use anyhow::Result;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const SCHEMA_CHANNEL: &str = "olm.channel";
pub const SCHEMA_BUNDLE: &str = "olm.bundle";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChannelEntry {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChannelObject {
    pub package: String,
    /// Channel name.
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entries: Vec<ChannelEntry>,
}

impl ChannelObject {
    /// The last entry is the channel head.
    pub fn latest_entry(&self) -> Option<&ChannelEntry> {
        self.entries.last()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RelatedImage {
    #[serde(default)]
    pub name: Option<String>,
    pub image: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BundleObject {
    pub name: String,
    pub package: String,
    #[serde(default, rename = "relatedImages", deserialize_with = "null_as_empty")]
    pub related_images: Vec<RelatedImage>,
}

/// Treat an explicit `null` list the same as a missing one.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One decoded document from the rendered index, keyed by its `schema` field.
///
/// Schemas other than `olm.channel` and `olm.bundle` (packages, deprecations,
/// objects without a schema) map to `Other` and are ignored downstream.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogObject {
    Channel(ChannelObject),
    Bundle(BundleObject),
    Other(Option<String>),
}

impl CatalogObject {
    pub fn from_value(value: Value) -> Result<Self> {
        let schema = value
            .get("schema")
            .and_then(Value::as_str)
            .map(str::to_string);
        let object = match schema.as_deref() {
            Some(SCHEMA_CHANNEL) => {
                let channel = serde_json::from_value(value)
                    .map_err(|err| ExtractError::catalog_parse(SCHEMA_CHANNEL, err))?;
                CatalogObject::Channel(channel)
            }
            Some(SCHEMA_BUNDLE) => {
                let bundle = serde_json::from_value(value)
                    .map_err(|err| ExtractError::catalog_parse(SCHEMA_BUNDLE, err))?;
                CatalogObject::Bundle(bundle)
            }
            _ => CatalogObject::Other(schema),
        };
        Ok(object)
    }
}
