//! Stream-form catalog handling.
//!
//! `opm render` emits a rendered index as back-to-back JSON objects with no
//! separator. This module decodes that stream into typed [`CatalogObject`]s and
//! resolves each selected `package:channel` to the related images of the
//! channel's latest bundle.

pub mod model;
pub mod resolve;
pub mod stream;

pub use model::{BundleObject, CatalogObject, ChannelEntry, ChannelObject, RelatedImage};
pub use resolve::{extract_related_images, latest_bundles};
pub use stream::{decode_json_stream, load_rendered_index};

use crate::selection::SelectionSpec;
use anyhow::Result;
use std::path::Path;

/// Full stream-form pipeline: load the rendered index and collect the images
/// for every selection.
pub fn extract_from_rendered_index(path: &Path, spec: &SelectionSpec) -> Result<Vec<String>> {
    let objects = load_rendered_index(path)?;
    extract_related_images(&objects, spec)
}
