//! Simulation parameters
//!
//! Everything the engine needs is read once from a [`SimConfig`] and never
//! changes afterwards. Configs come from [`SimConfig::default`], from JSON
//! text, or from a JSON file; missing fields fall back to the defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the initial square lattice handles a particle count that is not a perfect square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatticeFill {
    /// Reject counts that are not perfect squares
    #[default]
    PerfectSquare,
    /// Use `ceil(sqrt(count))` cells per side and leave the trailing cells empty
    ExtraRow,
}

/// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub particle_count: usize,
    /// Side length of the square periodic box
    pub box_length: f64,
    pub dt: f64,
    /// Number of steps to run, `None` runs until the consumer cancels
    pub steps: Option<u64>,
    pub epsilon: f64,
    pub sigma: f64,
    /// Interaction cutoff radius; pairs at or beyond it do not interact
    pub cutoff: f64,
    pub mass: f64,
    /// Seed for velocity sampling, `None` derives one from the clock
    pub seed: Option<u64>,
    pub lattice: LatticeFill,
    /// Log total energy every this many steps, 0 disables
    pub report_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 36,
            box_length: 10.0,
            dt: 0.005,
            steps: Some(100_000),
            epsilon: 1.0,
            sigma: 1.0,
            cutoff: 3.0,
            mass: 1.0,
            seed: None,
            lattice: LatticeFill::PerfectSquare,
            report_interval: 1000,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON text and validate it
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// Pretty JSON rendering, suitable for writing a starter config file
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter; nothing is clamped
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        self.validate_physics()?;
        if self.lattice == LatticeFill::PerfectSquare && !is_perfect_square(self.particle_count) {
            return Err(ConfigError::NotPerfectSquare(self.particle_count));
        }
        Ok(())
    }

    /// Check box, time step and interaction parameters, ignoring the lattice
    pub fn validate_physics(&self) -> Result<(), ConfigError> {
        if !(self.box_length.is_finite() && self.box_length > 0.0) {
            return Err(ConfigError::InvalidBoxLength(self.box_length));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.dt));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::InvalidMass(self.mass));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(ConfigError::InvalidSigma(self.sigma));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        // At or above L/2 a pair could see two periodic images within range
        if !(self.cutoff.is_finite() && self.cutoff > 0.0 && self.cutoff < 0.5 * self.box_length)
        {
            return Err(ConfigError::InvalidCutoff {
                cutoff: self.cutoff,
                box_length: self.box_length,
            });
        }
        Ok(())
    }
}

/// Integer square root, rounded down
pub(crate) fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    // Correct for float rounding on large inputs
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

pub(crate) fn is_perfect_square(n: usize) -> bool {
    let root = isqrt(n);
    root * root == n
}
