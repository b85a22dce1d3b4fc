use crate::error::ConfigError;
use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Workers spawned per available processor.
#[nutype(
    validate(greater = 0),
    default = 8,
    derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)
)]
pub struct PartitionMultiplier(usize);

/// Hard cap on the number of scan partitions.
#[nutype(
    validate(greater = 0),
    default = 32,
    derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)
)]
pub struct MaxPartitions(usize);

/// Matcher configuration, persisted as TOML.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl MatcherConfig {
    /// `sift.toml` under `data_dir`.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("sift.toml")
    }

    /// Reads the matcher settings at `path`. A missing file yields the
    /// built-in defaults; unset keys fall back individually.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes every setting, defaults included.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Scheduling knobs of the scan engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub partition_multiplier: PartitionMultiplier,
    #[serde(default)]
    pub max_partitions: MaxPartitions,
    /// Scans shorter than this never report progress.
    #[serde(default = "default_progress_min_duration_ms")]
    pub progress_min_duration_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            partition_multiplier: PartitionMultiplier::default(),
            max_partitions: MaxPartitions::default(),
            progress_min_duration_ms: default_progress_min_duration_ms(),
        }
    }
}

impl EngineConfig {
    /// Number of scan partitions on this machine.
    pub fn partitions(&self) -> usize {
        let cpus = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let wanted = self.partition_multiplier.into_inner().saturating_mul(cpus);
        wanted.min(self.max_partitions.into_inner())
    }

    pub fn progress_min_duration(&self) -> Duration {
        Duration::from_millis(self.progress_min_duration_ms)
    }
}

/// Query interpretation and result ordering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub case_matching: CaseMatching,
    #[serde(default = "default_true")]
    pub unicode_normalization: bool,
    /// Rank results by relevance instead of input order.
    #[serde(default = "default_true")]
    pub sort: bool,
    /// Tail-first: reversed input order and reversed tie-breaks.
    #[serde(default)]
    pub tac: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            case_matching: CaseMatching::default(),
            unicode_normalization: true,
            sort: true,
            tac: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMatching {
    Sensitive,
    Insensitive,
    /// Case-insensitive unless query contains uppercase.
    #[default]
    Smart,
}

fn default_progress_min_duration_ms() -> u64 {
    200
}

fn default_true() -> bool {
    true
}
