//! Engine configuration.
//!
//! Paths are passed explicitly into [`crate::BenchManager`]; nothing in the
//! engine reads a process-wide location.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{BenchError, BenchResult};

/// Config file looked up in the benchmarks dir when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "benchgate.yaml";

/// Where the engine finds its inputs and keeps its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory scanned for `benchmark_results_*.json`.
    pub results_dir: PathBuf,
    /// The comparison baseline.
    pub baseline_path: PathBuf,
    /// The threshold baseline used by the CI gate.
    pub threshold_baseline_path: PathBuf,
}

/// Partial overrides read from YAML. Unknown keys cause deserialization to
/// fail. Merge with `EngineConfig::apply`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfigOverrides {
    pub results_dir: Option<PathBuf>,
    pub baseline_path: Option<PathBuf>,
    pub threshold_baseline_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Conventional layout under `dir`.
    pub fn for_benchmarks_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            results_dir: dir.join("results"),
            baseline_path: dir.join("baseline.json"),
            threshold_baseline_path: dir.join("thresholds.json"),
        }
    }

    /// Apply overrides. Only `Some` values override; relative paths resolve
    /// against `base`.
    pub fn apply(self, base: &Path, overrides: EngineConfigOverrides) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            results_dir: overrides.results_dir.map(resolve).unwrap_or(self.results_dir),
            baseline_path: overrides
                .baseline_path
                .map(resolve)
                .unwrap_or(self.baseline_path),
            threshold_baseline_path: overrides
                .threshold_baseline_path
                .map(resolve)
                .unwrap_or(self.threshold_baseline_path),
        }
    }

    /// Layout for `dir`, overridden by `config_file` if given, else by
    /// `<dir>/benchgate.yaml` if it exists.
    ///
    /// An explicitly named file that cannot be read is an error; a missing
    /// default file is not.
    pub fn load(dir: impl AsRef<Path>, config_file: Option<&Path>) -> BenchResult<Self> {
        let dir = dir.as_ref();
        let defaults = Self::for_benchmarks_dir(dir);

        let path = match config_file {
            Some(p) => p.to_path_buf(),
            None => {
                let p = dir.join(DEFAULT_CONFIG_FILE);
                if !p.is_file() {
                    return Ok(defaults);
                }
                p
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| BenchError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        let overrides = if content.trim().is_empty() {
            EngineConfigOverrides::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| BenchError::Config {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?
        };

        debug!(path = %path.display(), "loaded engine config");
        Ok(defaults.apply(dir, overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let c = EngineConfig::for_benchmarks_dir("bench");
        assert_eq!(c.results_dir, PathBuf::from("bench/results"));
        assert_eq!(c.baseline_path, PathBuf::from("bench/baseline.json"));
        assert_eq!(c.threshold_baseline_path, PathBuf::from("bench/thresholds.json"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let c = EngineConfig::load(dir.path(), None).unwrap();
        assert_eq!(c, EngineConfig::for_benchmarks_dir(dir.path()));
    }

    #[test]
    fn test_default_file_overrides_and_resolves() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "results_dir: out\nthreshold_baseline_path: /etc/limits.json\n",
        )
        .unwrap();

        let c = EngineConfig::load(dir.path(), None).unwrap();
        assert_eq!(c.results_dir, dir.path().join("out"));
        assert_eq!(c.baseline_path, dir.path().join("baseline.json"));
        assert_eq!(c.threshold_baseline_path, PathBuf::from("/etc/limits.json"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.yaml");
        std::fs::write(&path, "baseline: x.json\n").unwrap();

        let err = EngineConfig::load(dir.path(), Some(&path)).unwrap_err();
        assert!(matches!(err, BenchError::Config { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = EngineConfig::load(dir.path(), Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, BenchError::Config { .. }));
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg.yaml");
        std::fs::write(&path, "\n").unwrap();
        let c = EngineConfig::load(dir.path(), Some(&path)).unwrap();
        assert_eq!(c, EngineConfig::for_benchmarks_dir(dir.path()));
    }
}
