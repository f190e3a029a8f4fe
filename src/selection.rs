//! Parsing of the operators spec file.
//!
//! Each non-empty line names one `package:channel` pair. Malformed lines are
//! reported and skipped; they never abort a run.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub package: String,
    pub channel: String,
}

/// Accepted selections in file order plus a package -> channel lookup.
///
/// `records` keeps every accepted line, duplicates included. `channels` keeps
/// one entry per package; a package that appears twice maps to its last
/// channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSpec {
    records: Vec<Selection>,
    channels: BTreeMap<String, String>,
}

impl SelectionSpec {
    pub fn records(&self) -> &[Selection] {
        &self.records
    }

    pub fn channel_for(&self, package: &str) -> Option<&str> {
        self.channels.get(package).map(String::as_str)
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.channels.contains_key(package)
    }

    /// Distinct packages in the order they were first requested, each paired
    /// with its effective (last-wins) channel.
    pub fn packages(&self) -> Vec<Selection> {
        let mut seen = Vec::<&str>::new();
        let mut out = Vec::new();
        for record in &self.records {
            if seen.contains(&record.package.as_str()) {
                continue;
            }
            seen.push(record.package.as_str());
            if let Some(channel) = self.channel_for(&record.package) {
                out.push(Selection {
                    package: record.package.clone(),
                    channel: channel.to_string(),
                });
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push(&mut self, package: String, channel: String) {
        self.channels.insert(package.clone(), channel.clone());
        self.records.push(Selection { package, channel });
    }
}

pub fn parse_selection_lines<'a, I>(lines: I) -> SelectionSpec
where
    I: IntoIterator<Item = &'a str>,
{
    let mut spec = SelectionSpec::default();
    for line in lines.into_iter().filter(|line| !line.is_empty()) {
        let fields: Vec<&str> = line.split(':').collect();
        let [package, channel] = fields.as_slice() else {
            warn!(record = ?fields, "operators record is malformed, skipping");
            continue;
        };
        let (package, channel) = (package.trim(), channel.trim());
        info!(package, channel, "will process package");
        spec.push(package.to_string(), channel.to_string());
    }
    spec
}

/// Read and parse an operators spec file.
pub fn load_selection_spec(path: &Path) -> Result<SelectionSpec> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading operators spec {}", path.display()))?;
    Ok(parse_selection_lines(raw.lines()))
}
