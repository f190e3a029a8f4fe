#![allow(dead_code)]

// Fixture builders and process helpers shared by the integration tests.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "parse-index" => env!("CARGO_BIN_EXE_parse-index"),
        "parse-catalog-dir" => env!("CARGO_BIN_EXE_parse-catalog-dir"),
        "patch-precache-image" => env!("CARGO_BIN_EXE_patch-precache-image"),
        other => panic!("unknown helper {other}"),
    };
    PathBuf::from(path)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn channel_doc(package: &str, name: &str, entries: &[&str]) -> String {
    let entries: Vec<String> = entries
        .iter()
        .map(|entry| format!(r#"{{"name":"{entry}"}}"#))
        .collect();
    format!(
        r#"{{"schema":"olm.channel","package":"{package}","name":"{name}","entries":[{}]}}"#,
        entries.join(",")
    )
}

pub fn bundle_doc(package: &str, name: &str, images: &[&str]) -> String {
    let images: Vec<String> = images
        .iter()
        .enumerate()
        .map(|(i, image)| format!(r#"{{"name":"image-{i}","image":"{image}"}}"#))
        .collect();
    format!(
        r#"{{"schema":"olm.bundle","package":"{package}","name":"{name}","relatedImages":[{}]}}"#,
        images.join(",")
    )
}

pub fn package_yaml(package: &str, channels: &[(&str, &str)]) -> String {
    let mut out = format!("packageName: {package}\nchannels:\n");
    for (name, current) in channels {
        out.push_str(&format!("- name: {name}\n  currentCSV: {current}\n"));
    }
    out
}

pub fn csv_yaml(name: &str, images: &[&str]) -> String {
    let mut out = format!(
        "apiVersion: operators.coreos.com/v1alpha1\nkind: ClusterServiceVersion\nmetadata:\n  name: {name}\nspec:\n  relatedImages:\n"
    );
    for (i, image) in images.iter().enumerate() {
        out.push_str(&format!("  - name: image-{i}\n    image: {image}\n"));
    }
    out
}

/// Lay out `<root>/<package>/package.yaml` and one bundle dir per entry in
/// `bundles`, each holding a CSV with the given images.
pub fn write_package(
    root: &Path,
    package: &str,
    channels: &[(&str, &str)],
    bundles: &[(&str, Vec<&str>)],
) -> Result<()> {
    let package_dir = root.join(package);
    fs::create_dir_all(&package_dir)?;
    fs::write(package_dir.join("package.yaml"), package_yaml(package, channels))?;
    for (dir, images) in bundles {
        let bundle_dir = package_dir.join(dir);
        fs::create_dir_all(&bundle_dir)?;
        fs::write(
            bundle_dir.join(format!("{package}.clusterserviceversion.yaml")),
            csv_yaml(&format!("{package}.{dir}"), images.as_slice()),
        )?;
    }
    Ok(())
}
