//! Energy and momentum measurements used to watch conservation during a run

use crate::ensemble::Ensemble;
use crate::forces::LennardJones;
use glam::DVec2;

pub fn kinetic_energy(ensemble: &Ensemble, mass: f64) -> f64 {
    0.5 * mass
        * ensemble
            .velocities
            .iter()
            .map(|v| v.length_squared())
            .sum::<f64>()
}

pub fn total_energy(ensemble: &Ensemble, field: &LennardJones, mass: f64) -> f64 {
    kinetic_energy(ensemble, mass) + field.potential_energy(ensemble)
}

/// Total linear momentum `Σ m v`
pub fn total_momentum(ensemble: &Ensemble, mass: f64) -> DVec2 {
    ensemble.velocities.iter().copied().sum::<DVec2>() * mass
}

/// Instantaneous temperature in reduced units (k_B = 1)
///
/// Two degrees of freedom per particle, minus the two removed by zeroing the
/// total momentum.
pub fn temperature(ensemble: &Ensemble, mass: f64) -> f64 {
    let dof = 2 * ensemble.len().saturating_sub(1);
    if dof == 0 {
        return 0.0;
    }
    2.0 * kinetic_energy(ensemble, mass) / dof as f64
}

/// Tracks drift of total energy against the value at the start of a run
#[derive(Debug, Clone, Copy)]
pub struct EnergyMonitor {
    pub baseline: f64,
}

impl EnergyMonitor {
    pub fn new(baseline: f64) -> Self {
        Self { baseline }
    }

    /// `|E - E₀| / |E₀|`, or the absolute error when `E₀` is ~0
    pub fn relative_drift(&self, energy: f64) -> f64 {
        let error = (energy - self.baseline).abs();
        if self.baseline.abs() > 1e-12 {
            error / self.baseline.abs()
        } else {
            error
        }
    }
}
