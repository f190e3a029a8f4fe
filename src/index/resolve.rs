//! Channel and bundle resolution over a decoded rendered index.

use crate::error::ExtractError;
use crate::index::model::CatalogObject;
use crate::selection::SelectionSpec;
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Map each selected package to the head bundle of its requested channel.
///
/// The first matching channel object in document order wins; duplicates are
/// logged and ignored. A selected package whose channel never shows up is
/// logged and left out of the map rather than failing the run. A matching
/// channel with no entries is a resolution error.
pub fn latest_bundles(
    objects: &[CatalogObject],
    spec: &SelectionSpec,
) -> Result<BTreeMap<String, String>> {
    let mut latest: BTreeMap<String, String> = BTreeMap::new();
    for object in objects {
        let CatalogObject::Channel(channel) = object else {
            continue;
        };
        if spec.channel_for(&channel.package) != Some(channel.name.as_str()) {
            continue;
        }
        if latest.contains_key(&channel.package) {
            warn!(
                package = %channel.package,
                channel = %channel.name,
                "duplicate channel object in index, keeping the first"
            );
            continue;
        }
        let Some(entry) = channel.latest_entry() else {
            return Err(ExtractError::resolution(format!(
                "channel '{}' of package '{}' has no entries",
                channel.name, channel.package
            ))
            .into());
        };
        info!(package = %channel.package, channel = %channel.name, bundle = %entry.name, "selected latest bundle");
        latest.insert(channel.package.clone(), entry.name.clone());
    }

    for selection in spec.packages() {
        if !latest.contains_key(&selection.package) {
            warn!(
                package = %selection.package,
                channel = %selection.channel,
                "channel not found in index, package contributes no images"
            );
        }
    }
    Ok(latest)
}

/// Collect related images for every resolved bundle.
///
/// Images are emitted in the order bundle objects appear in the index, each
/// bundle's entries in declared order. A resolved bundle with no matching
/// `olm.bundle` object is a resolution error.
pub fn extract_related_images(
    objects: &[CatalogObject],
    spec: &SelectionSpec,
) -> Result<Vec<String>> {
    let latest = latest_bundles(objects, spec)?;
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut images = Vec::new();

    for object in objects {
        let CatalogObject::Bundle(bundle) = object else {
            continue;
        };
        if latest.get(&bundle.package) != Some(&bundle.name) {
            continue;
        }
        if !seen.insert(bundle.package.as_str()) {
            warn!(bundle = %bundle.name, "duplicate bundle object in index, keeping the first");
            continue;
        }
        images.extend(bundle.related_images.iter().map(|img| img.image.clone()));
    }

    if let Some((package, bundle)) = latest
        .iter()
        .find(|(package, _)| !seen.contains(package.as_str()))
    {
        return Err(ExtractError::resolution(format!(
            "bundle '{bundle}' for package '{package}' not found in index"
        ))
        .into());
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::decode_json_stream;
    use crate::selection::parse_selection_lines;

    fn channel(package: &str, name: &str, entries: &[&str]) -> String {
        let entries: Vec<String> = entries
            .iter()
            .map(|e| format!(r#"{{"name":"{e}"}}"#))
            .collect();
        format!(
            r#"{{"schema":"olm.channel","package":"{package}","name":"{name}","entries":[{}]}}"#,
            entries.join(",")
        )
    }

    fn bundle(package: &str, name: &str, images: &[&str]) -> String {
        let images: Vec<String> = images
            .iter()
            .map(|i| format!(r#"{{"name":"img","image":"{i}"}}"#))
            .collect();
        format!(
            r#"{{"schema":"olm.bundle","package":"{package}","name":"{name}","relatedImages":[{}]}}"#,
            images.join(",")
        )
    }

    #[test]
    fn last_entry_is_latest() {
        let objects = decode_json_stream(&channel("pkgA", "stable", &["A", "B", "C"])).unwrap();
        let spec = parse_selection_lines(["pkgA:stable"]);
        let latest = latest_bundles(&objects, &spec).unwrap();
        assert_eq!(latest.get("pkgA").map(String::as_str), Some("C"));
    }

    #[test]
    fn empty_entries_fail_resolution() {
        let objects = decode_json_stream(&channel("pkgA", "stable", &[])).unwrap();
        let spec = parse_selection_lines(["pkgA:stable"]);
        let err = latest_bundles(&objects, &spec).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::Resolution(_))
        ));
    }

    #[test]
    fn other_channels_and_packages_are_ignored() {
        let blob = [
            channel("pkgA", "fast", &["pkgA.v9"]),
            channel("pkgA", "stable", &["pkgA.v1"]),
            channel("pkgB", "stable", &["pkgB.v1"]),
            bundle("pkgA", "pkgA.v9", &["fast/a"]),
            bundle("pkgA", "pkgA.v1", &["stable/a1", "stable/a2"]),
            bundle("pkgB", "pkgB.v1", &["b"]),
        ]
        .concat();
        let objects = decode_json_stream(&blob).unwrap();
        let spec = parse_selection_lines(["pkgA:stable"]);
        let images = extract_related_images(&objects, &spec).unwrap();
        assert_eq!(images, ["stable/a1", "stable/a2"]);
    }

    #[test]
    fn first_duplicate_channel_wins() {
        let blob = [
            channel("pkgA", "stable", &["pkgA.v1"]),
            channel("pkgA", "stable", &["pkgA.v2"]),
        ]
        .concat();
        let objects = decode_json_stream(&blob).unwrap();
        let spec = parse_selection_lines(["pkgA:stable"]);
        let latest = latest_bundles(&objects, &spec).unwrap();
        assert_eq!(latest.get("pkgA").map(String::as_str), Some("pkgA.v1"));
    }

    #[test]
    fn unmatched_channel_contributes_nothing() {
        let blob = [
            channel("pkgA", "stable", &["pkgA.v1"]),
            bundle("pkgA", "pkgA.v1", &["a"]),
        ]
        .concat();
        let objects = decode_json_stream(&blob).unwrap();
        let spec = parse_selection_lines(["pkgA:stable", "pkgMissing:stable", "pkgA2:beta"]);
        let images = extract_related_images(&objects, &spec).unwrap();
        assert_eq!(images, ["a"]);
    }

    #[test]
    fn missing_bundle_object_fails() {
        let objects = decode_json_stream(&channel("pkgA", "stable", &["pkgA.v1"])).unwrap();
        let spec = parse_selection_lines(["pkgA:stable"]);
        let err = extract_related_images(&objects, &spec).unwrap_err();
        assert!(format!("{err:#}").contains("pkgA.v1"));
    }

    #[test]
    fn duplicates_across_packages_are_preserved() {
        let blob = [
            channel("pkgA", "stable", &["pkgA.v1"]),
            channel("pkgB", "stable", &["pkgB.v1"]),
            bundle("pkgA", "pkgA.v1", &["shared/img:1"]),
            bundle("pkgB", "pkgB.v1", &["shared/img:1"]),
        ]
        .concat();
        let objects = decode_json_stream(&blob).unwrap();
        let spec = parse_selection_lines(["pkgB:stable", "pkgA:stable"]);
        let images = extract_related_images(&objects, &spec).unwrap();
        assert_eq!(images, ["shared/img:1", "shared/img:1"]);
    }
}
