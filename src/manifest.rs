//! Patching the pre-caching workload image into a bundle manifest.
//!
//! Release builds publish the workload image under a digest that is only known
//! at build time. This rewrites the matching `spec.relatedImages` entry of a
//! manifest (typically a CSV) in place.

use crate::error::ExtractError;
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// `relatedImages` entry name that carries the workload image.
pub const WORKLOAD_IMAGE_NAME: &str = "pre-caching-workload";

/// Set the `image` of the first `spec.relatedImages` entry named
/// [`WORKLOAD_IMAGE_NAME`] inside an already-parsed document.
pub fn set_workload_image(document: &mut Value, pull_spec: &str) -> Result<()> {
    let entries = document
        .get_mut("spec")
        .and_then(|spec| spec.get_mut("relatedImages"))
        .and_then(Value::as_sequence_mut)
        .ok_or_else(|| ExtractError::resolution("manifest has no spec.relatedImages list"))?;
    let entry = entries
        .iter_mut()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(WORKLOAD_IMAGE_NAME))
        .ok_or_else(|| {
            ExtractError::resolution(format!(
                "no relatedImages entry named '{WORKLOAD_IMAGE_NAME}'"
            ))
        })?;
    let mapping = entry.as_mapping_mut().ok_or_else(|| {
        ExtractError::resolution(format!("'{WORKLOAD_IMAGE_NAME}' entry is not a mapping"))
    })?;
    mapping.insert(Value::from("image"), Value::from(pull_spec));
    Ok(())
}

/// Load `path`, patch the workload image, and rewrite the whole file.
pub fn patch_manifest(path: &Path, pull_spec: &str) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let mut document: Value = serde_yaml::from_str(&raw)
        .map_err(|err| ExtractError::catalog_parse(path.display().to_string(), err))?;
    set_workload_image(&mut document, pull_spec)
        .with_context(|| format!("patching {}", path.display()))?;
    let rendered = serde_yaml::to_string(&document)
        .with_context(|| format!("serializing manifest {}", path.display()))?;
    fs::write(path, rendered).with_context(|| format!("writing manifest {}", path.display()))?;
    info!(manifest = %path.display(), image = pull_spec, "patched pre-caching workload image");
    Ok(())
}
