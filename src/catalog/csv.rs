//! Locating a bundle's ClusterServiceVersion and reading its related images.

use crate::error::ExtractError;
use crate::index::RelatedImage;
use crate::index::model::null_as_empty;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CSV_SUFFIX: &str = ".clusterserviceversion.yaml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CsvSpec {
    #[serde(default, rename = "relatedImages", deserialize_with = "null_as_empty")]
    pub related_images: Vec<RelatedImage>,
}

/// The subset of a ClusterServiceVersion document this tool reads.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClusterServiceVersion {
    pub spec: CsvSpec,
}

impl ClusterServiceVersion {
    pub fn parse(raw: &str, source_name: &str) -> Result<Self> {
        serde_yaml::from_str(raw)
            .map_err(|err| ExtractError::catalog_parse(source_name, err).into())
    }

    pub fn images(&self) -> Vec<String> {
        self.spec
            .related_images
            .iter()
            .map(|related| related.image.clone())
            .collect()
    }
}

/// Find the CSV file inside `bundle_dir`.
///
/// When several files carry the suffix, the last one by name is used.
pub fn locate_csv(bundle_dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(bundle_dir)
        .with_context(|| format!("listing bundle directory {}", bundle_dir.display()))?;
    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading {}", bundle_dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(CSV_SUFFIX) && entry.path().is_file() {
            matches.push(name);
        }
    }
    matches.sort();
    if matches.len() > 1 {
        warn!(bundle_dir = %bundle_dir.display(), files = ?matches, "several CSV files found, using the last");
    }
    let chosen = matches.pop().ok_or_else(|| {
        ExtractError::resolution(format!(
            "no *{CSV_SUFFIX} file in {}",
            bundle_dir.display()
        ))
    })?;
    debug!(csv = %chosen, "located CSV");
    Ok(bundle_dir.join(chosen))
}

pub fn load_csv_images(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading CSV {}", path.display()))?;
    let csv = ClusterServiceVersion::parse(&raw, &path.display().to_string())?;
    Ok(csv.images())
}
