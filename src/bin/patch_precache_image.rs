//! Writes the pre-caching workload pull-spec into a manifest's
//! `spec.relatedImages` entry named `pre-caching-workload`.
//!
//! Usage:
//!   patch-precache-image <manifest> <pull_spec>

use anyhow::Result;
use clap::Parser;
use precache_images::manifest::patch_manifest;
use precache_images::{logging, parse_cli_or_exit, report_failure};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "patch-precache-image")]
#[command(about = "Patch the pre-caching workload image into a manifest.")]
struct Cli {
    /// Manifest file to rewrite in place.
    manifest: PathBuf,
    /// Image pull-spec to record.
    pull_spec: String,
}

fn main() {
    logging::init();
    let cli: Cli = parse_cli_or_exit();
    if let Err(err) = run(&cli) {
        report_failure(&err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    patch_manifest(&cli.manifest, &cli.pull_spec)
}
