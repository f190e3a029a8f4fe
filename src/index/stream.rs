//! Decoder for concatenated JSON documents.

use crate::error::ExtractError;
use crate::index::model::CatalogObject;
use anyhow::{Context, Result};
use serde_json::{Deserializer, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Decode a blob of adjacent JSON values into catalog objects, in order.
///
/// Whitespace between values is optional. An empty or whitespace-only blob
/// yields no objects. Any position that does not start a valid JSON value is a
/// `CatalogParse` error carrying the byte offset where decoding stopped.
pub fn decode_json_stream(input: &str) -> Result<Vec<CatalogObject>> {
    let mut stream = Deserializer::from_str(input).into_iter::<Value>();
    let mut objects = Vec::new();
    loop {
        let offset = stream.byte_offset();
        let Some(next) = stream.next() else {
            break;
        };
        let value = next.map_err(|err| {
            ExtractError::catalog_parse(
                "rendered index",
                format!("invalid JSON value at byte {offset}: {err}"),
            )
        })?;
        let object = CatalogObject::from_value(value)
            .with_context(|| format!("decoding catalog object {}", objects.len() + 1))?;
        objects.push(object);
    }
    debug!(count = objects.len(), "decoded rendered index");
    Ok(objects)
}

pub fn load_rendered_index(path: &Path) -> Result<Vec<CatalogObject>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading rendered index {}", path.display()))?;
    decode_json_stream(&raw).with_context(|| format!("parsing rendered index {}", path.display()))
}
