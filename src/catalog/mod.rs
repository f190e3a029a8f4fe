//! Directory-tree catalog handling.
//!
//! A downloaded index laid out as `<root>/<package>/package.yaml` plus one
//! directory per bundle version, each holding a
//! `*.clusterserviceversion.yaml`. Selections resolve through the package
//! manifest's `currentCSV`, a fuzzy match against the bundle directory names,
//! and finally the CSV's `spec.relatedImages`.

pub mod csv;
pub mod matcher;
pub mod package;

pub use csv::{CSV_SUFFIX, ClusterServiceVersion, load_csv_images, locate_csv};
pub use matcher::{
    RankedCandidate, best_candidate, list_bundle_dirs, rank_candidates, select_bundle_dir,
};
pub use package::{PackageChannel, PackageManifest, resolve_version_token, version_token};

use crate::config::ExtractOptions;
use crate::selection::{Selection, SelectionSpec};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Manifest file expected in every package directory.
pub const PACKAGE_MANIFEST: &str = "package.yaml";

/// Resolve every selected package and collect its bundle's related images.
///
/// Packages are processed in selection order. Any failure aborts the whole
/// run and nothing collected so far is returned.
pub fn extract_from_directory(
    root: &Path,
    spec: &SelectionSpec,
    options: &ExtractOptions,
) -> Result<Vec<String>> {
    let mut images = Vec::new();
    for selection in spec.packages() {
        let found = images_for_selection(root, &selection, options).with_context(|| {
            format!(
                "extracting images for package '{}' channel '{}'",
                selection.package, selection.channel
            )
        })?;
        images.extend(found);
    }
    Ok(images)
}

fn images_for_selection(
    root: &Path,
    selection: &Selection,
    options: &ExtractOptions,
) -> Result<Vec<String>> {
    let token = resolve_version_token(root, selection)?;
    let package_dir = root.join(&selection.package);
    let bundle_dir = select_bundle_dir(&package_dir, &token, options)?;
    let csv_path = locate_csv(&bundle_dir)?;
    let images = load_csv_images(&csv_path)?;
    info!(
        package = %selection.package,
        csv = %csv_path.display(),
        count = images.len(),
        "collected related images"
    );
    Ok(images)
}
