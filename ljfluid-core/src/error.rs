//! Error types for configuration and stepping failures

use std::path::PathBuf;
use thiserror::Error;

/// Rejected configuration, raised before any particle is placed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("particle count must be at least 1")]
    NoParticles,
    #[error("box length must be positive and finite, got {0}")]
    InvalidBoxLength(f64),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("sigma must be positive and finite, got {0}")]
    InvalidSigma(f64),
    #[error("epsilon must be non-negative and finite, got {0}")]
    InvalidEpsilon(f64),
    #[error("cutoff {cutoff} must be positive and below half of box length {box_length}")]
    InvalidCutoff { cutoff: f64, box_length: f64 },
    #[error("particle count {0} is not a perfect square; use the \"extra_row\" lattice fill to place it")]
    NotPerfectSquare(usize),
    #[error("particle {particle} at ({x}, {y}) is not inside the box [0, {box_length})")]
    PositionOutsideBox {
        particle: usize,
        x: f64,
        y: f64,
        box_length: f64,
    },
    #[error("ensemble arrays disagree: {positions} positions, {velocities} velocities, {forces} forces")]
    MismatchedLengths {
        positions: usize,
        velocities: usize,
        forces: usize,
    },
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Numerical failure detected while evaluating forces or moving particles
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("particles {i} and {j} coincide inside the cutoff")]
    CoincidentParticles { i: usize, j: usize },
    #[error("particle {particle} has a non-finite position")]
    NonFinite { particle: usize },
    #[error("particle {particle} moved more than one box length in a single step (coordinate {coordinate})")]
    ParticleEscaped { particle: usize, coordinate: f64 },
}

/// Top-level error returned by the simulation driver
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("simulation aborted at step {step}: {source}")]
    Aborted {
        step: u64,
        #[source]
        source: SimError,
    },
}
