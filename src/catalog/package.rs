//! `package.yaml` loading and channel head resolution.

use crate::catalog::PACKAGE_MANIFEST;
use crate::error::ExtractError;
use crate::index::model::null_as_empty;
use crate::selection::Selection;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PackageChannel {
    pub name: String,
    #[serde(rename = "currentCSV")]
    pub current_csv: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PackageManifest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub channels: Vec<PackageChannel>,
}

impl PackageManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading package manifest {}", path.display()))?;
        Self::parse(&raw, &path.display().to_string())
    }

    pub fn parse(raw: &str, source_name: &str) -> Result<Self> {
        serde_yaml::from_str(raw)
            .map_err(|err| ExtractError::catalog_parse(source_name, err).into())
    }

    pub fn channel(&self, name: &str) -> Option<&PackageChannel> {
        self.channels.iter().find(|channel| channel.name == name)
    }
}

/// Strip the `<package>.` prefix from a `currentCSV` value.
///
/// Values without the prefix are returned unchanged so the fuzzy matcher still
/// gets something to rank against.
pub fn version_token<'a>(package: &str, current_csv: &'a str) -> &'a str {
    current_csv
        .strip_prefix(package)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(current_csv)
}

/// Read `<root>/<package>/package.yaml` and return the bare version token of
/// the selected channel's head.
pub fn resolve_version_token(root: &Path, selection: &Selection) -> Result<String> {
    let package_dir = root.join(&selection.package);
    if !package_dir.is_dir() {
        return Err(ExtractError::resolution(format!(
            "package directory {} not found",
            package_dir.display()
        ))
        .into());
    }
    let manifest_path = package_dir.join(PACKAGE_MANIFEST);
    if !manifest_path.is_file() {
        return Err(ExtractError::resolution(format!(
            "package manifest {} not found",
            manifest_path.display()
        ))
        .into());
    }
    let manifest = PackageManifest::load(&manifest_path)?;
    let channel = manifest.channel(&selection.channel).ok_or_else(|| {
        ExtractError::resolution(format!(
            "channel '{}' not declared in {}",
            selection.channel,
            manifest_path.display()
        ))
    })?;
    let token = version_token(&selection.package, &channel.current_csv);
    debug!(package = %selection.package, current_csv = %channel.current_csv, token, "resolved channel head");
    Ok(token.to_string())
}
