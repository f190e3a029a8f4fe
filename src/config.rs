//! Per-run configuration shared by the extraction pipelines.
//!
//! Everything a pipeline needs beyond its input paths is carried in
//! [`ExtractOptions`] and passed explicitly; nothing is read from process-wide
//! state once a run has started.

use anyhow::{Result, bail};
use std::env;

/// Env var that sets a minimum similarity score for bundle-directory matches.
pub const ENV_MIN_MATCH_SCORE: &str = "PRECACHE_MIN_MATCH_SCORE";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtractOptions {
    /// Reject the best fuzzy bundle-directory match when it scores below this
    /// value. `None` accepts whatever scores highest.
    pub min_match_score: Option<f64>,
}

impl ExtractOptions {
    /// Build options from an explicit flag value, falling back to the env var.
    pub fn resolve(min_score_flag: Option<f64>) -> Result<Self> {
        Self::resolve_with(min_score_flag, env::var(ENV_MIN_MATCH_SCORE).ok())
    }

    /// Same as [`ExtractOptions::resolve`] with the env var value supplied by
    /// the caller.
    pub fn resolve_with(min_score_flag: Option<f64>, env_value: Option<String>) -> Result<Self> {
        let min_match_score = match min_score_flag {
            Some(value) => Some(value),
            None => parse_env_score(env_value.as_deref())?,
        };
        if let Some(score) = min_match_score {
            validate_score(score)?;
        }
        Ok(Self { min_match_score })
    }
}

fn parse_env_score(raw: Option<&str>) -> Result<Option<f64>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => bail!("{ENV_MIN_MATCH_SCORE} must be a number, got '{raw}'"),
        },
        _ => Ok(None),
    }
}

fn validate_score(score: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&score) {
        bail!("minimum match score must be within [0, 1], got {score}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_value_is_validated() {
        let opts = ExtractOptions::resolve(Some(0.5)).unwrap();
        assert_eq!(opts.min_match_score, Some(0.5));
        assert!(ExtractOptions::resolve(Some(1.5)).is_err());
        assert!(ExtractOptions::resolve(Some(-0.1)).is_err());
    }

    #[test]
    fn env_value_is_the_fallback() {
        let opts = ExtractOptions::resolve_with(None, Some("0.4".into())).unwrap();
        assert_eq!(opts.min_match_score, Some(0.4));
        let opts = ExtractOptions::resolve_with(None, Some("  ".into())).unwrap();
        assert_eq!(opts.min_match_score, None);
        let opts = ExtractOptions::resolve_with(None, None).unwrap();
        assert_eq!(opts.min_match_score, None);
    }

    #[test]
    fn flag_wins_over_env_value() {
        let opts = ExtractOptions::resolve_with(Some(0.7), Some("0.4".into())).unwrap();
        assert_eq!(opts.min_match_score, Some(0.7));
        // A bad env value is ignored when the flag is present.
        let opts = ExtractOptions::resolve_with(Some(0.7), Some("abc".into())).unwrap();
        assert_eq!(opts.min_match_score, Some(0.7));
    }

    #[test]
    fn bad_env_values_are_rejected() {
        let err = ExtractOptions::resolve_with(None, Some("abc".into())).unwrap_err();
        assert!(format!("{err:#}").contains(ENV_MIN_MATCH_SCORE));
        assert!(ExtractOptions::resolve_with(None, Some("2".into())).is_err());
    }

    #[test]
    fn default_accepts_any_match() {
        assert_eq!(ExtractOptions::default().min_match_score, None);
    }
}
