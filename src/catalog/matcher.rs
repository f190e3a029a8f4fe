//! Fuzzy selection of a bundle directory for a version token.
//!
//! Bundle directories are not guaranteed to be named exactly after the
//! version in `currentCSV` (build suffixes, `v` prefixes), so every sibling
//! directory is scored with [`sequence_ratio`] and the best one wins. Listings
//! are sorted by name first; on equal scores the later name wins.

use crate::config::ExtractOptions;
use crate::error::ExtractError;
use crate::similarity::sequence_ratio;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq)]
pub struct RankedCandidate {
    pub name: String,
    pub score: f64,
}

/// Immediate subdirectories of `package_dir`, sorted by name.
pub fn list_bundle_dirs(package_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(package_dir)
        .with_context(|| format!("listing bundle directories in {}", package_dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading {}", package_dir.display()))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Score every candidate against `token`, keeping the input order.
pub fn rank_candidates(token: &str, names: &[String]) -> Vec<RankedCandidate> {
    names
        .iter()
        .map(|name| RankedCandidate {
            name: name.clone(),
            score: sequence_ratio(token, name),
        })
        .collect()
}

/// Highest scoring candidate; the last one wins a tie.
pub fn best_candidate(token: &str, names: &[String]) -> Option<RankedCandidate> {
    rank_candidates(token, names)
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
}

/// Pick the bundle directory under `package_dir` that best matches `token`.
///
/// Fails when the package has no bundle directories, or when
/// `options.min_match_score` is set and the best score falls below it.
pub fn select_bundle_dir(
    package_dir: &Path,
    token: &str,
    options: &ExtractOptions,
) -> Result<PathBuf> {
    let names = list_bundle_dirs(package_dir)?;
    let best = best_candidate(token, &names).ok_or_else(|| {
        ExtractError::resolution(format!(
            "no bundle directories under {}",
            package_dir.display()
        ))
    })?;
    debug!(token, candidates = names.len(), "ranked bundle directories");

    if let Some(min) = options.min_match_score {
        if best.score < min {
            return Err(ExtractError::resolution(format!(
                "best bundle directory '{}' for '{token}' scores {:.3}, below minimum {min}",
                best.name, best.score
            ))
            .into());
        }
    }
    info!(token, bundle_dir = %best.name, score = best.score, "matched bundle directory");
    Ok(package_dir.join(best.name))
}
