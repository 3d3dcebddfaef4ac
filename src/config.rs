//! Audit configuration: defaults, TOML file layer, and validation.
//!
//! Values are resolved in three layers: built-in defaults, then an optional
//! TOML file, then command-line arguments. Validation runs once on the merged
//! result, before any sieving starts.
//!
//! ```toml
//! upper_bound = 1299709
//! certainty = 100
//! parallel = true
//! samples = 10000
//! seed = 42
//! threads = 8
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::non_prime::DEFAULT_SAMPLES;

/// The 100 000th prime.
pub const DEFAULT_UPPER_BOUND: u32 = 1_299_709;
pub const DEFAULT_CERTAINTY: u32 = 100;
/// Largest accepted certainty; `4^(c/2)` then has a million bits.
pub const MAX_CERTAINTY: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Inclusive sieve bound.
    pub upper_bound: u32,
    pub certainty: u32,
    /// Evaluate the accuracy check on the rayon pool.
    pub parallel: bool,
    /// Random candidates drawn by the non-prime check.
    pub samples: usize,
    /// Fixed RNG seed; OS entropy when absent.
    pub seed: Option<u64>,
    /// Rayon pool size; all cores when absent or 0.
    pub threads: Option<usize>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            upper_bound: DEFAULT_UPPER_BOUND,
            certainty: DEFAULT_CERTAINTY,
            parallel: true,
            samples: DEFAULT_SAMPLES,
            seed: None,
            threads: None,
        }
    }
}

impl AuditConfig {
    /// Check the merged configuration for values the audit cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.upper_bound < 2 {
            anyhow::bail!("upper_bound must be at least 2 (got {})", self.upper_bound);
        }
        if self.upper_bound > i32::MAX as u32 {
            anyhow::bail!(
                "upper_bound must fit the 32-bit sampling range (got {}, max {})",
                self.upper_bound,
                i32::MAX
            );
        }
        if self.certainty == 0 {
            anyhow::bail!("certainty must be positive");
        }
        if self.certainty > MAX_CERTAINTY {
            anyhow::bail!(
                "certainty {} exceeds the supported maximum {}",
                self.certainty,
                MAX_CERTAINTY
            );
        }
        if self.samples == 0 {
            anyhow::bail!("samples must be positive");
        }
        Ok(())
    }
}

/// Parse an audit configuration from a TOML string. Missing keys keep their
/// defaults.
pub fn parse_toml(content: &str) -> Result<AuditConfig> {
    let config: AuditConfig = toml::from_str(content)?;
    Ok(config)
}

/// Parse an audit configuration from a TOML file path.
pub fn parse_toml_file(path: &Path) -> Result<AuditConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("parsing config file {}", path.display()))
}
