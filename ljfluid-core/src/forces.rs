//! Truncated Lennard-Jones 12-6 pair interaction under periodic boundaries

use crate::boundary::minimum_image_vec;
use crate::config::SimConfig;
use crate::ensemble::Ensemble;
use crate::error::SimError;
use glam::DVec2;

/// Lennard-Jones parameters bound to a periodic box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJones {
    pub epsilon: f64,
    pub sigma: f64,
    pub cutoff_sq: f64,
    pub box_length: f64,
}

impl LennardJones {
    pub fn new(epsilon: f64, sigma: f64, cutoff: f64, box_length: f64) -> Self {
        Self {
            epsilon,
            sigma,
            cutoff_sq: cutoff * cutoff,
            box_length,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.epsilon, config.sigma, config.cutoff, config.box_length)
    }

    /// Force on the first particle of a pair separated by `d` (already minimum-imaged)
    ///
    /// Returns `None` when the pair is at or beyond the cutoff. At `r² = 0` the
    /// result is non-finite; [`compute_forces`](Self::compute_forces) checks for
    /// that before calling.
    pub fn pair_force(&self, d: DVec2) -> Option<DVec2> {
        let r2 = d.length_squared();
        if r2 >= self.cutoff_sq {
            return None;
        }
        let sr2 = self.sigma * self.sigma / r2;
        let r6 = sr2 * sr2 * sr2;
        let f = 24.0 * self.epsilon / r2 * (2.0 * r6 * r6 - r6);
        Some(d * f)
    }

    /// Unshifted pair energy `4ε[(σ/r)^12 - (σ/r)^6]`
    pub fn pair_potential(&self, r2: f64) -> f64 {
        let sr2 = self.sigma * self.sigma / r2;
        let r6 = sr2 * sr2 * sr2;
        4.0 * self.epsilon * (r6 * r6 - r6)
    }

    /// Pair energy shifted to zero at the cutoff, zero beyond it
    ///
    /// The shift leaves forces untouched, so this is the energy that the
    /// truncated force field actually conserves.
    pub fn shifted_pair_potential(&self, r2: f64) -> f64 {
        if r2 >= self.cutoff_sq {
            0.0
        } else {
            self.pair_potential(r2) - self.pair_potential(self.cutoff_sq)
        }
    }

    /// Recompute every force in the ensemble from its current positions
    ///
    /// O(n²) over unordered pairs; each pair is evaluated once and applied to
    /// both particles with opposite signs.
    pub fn compute_forces(&self, ensemble: &mut Ensemble) -> Result<(), SimError> {
        let n = ensemble.len();
        let positions = &ensemble.positions;
        let forces = &mut ensemble.forces;

        forces.iter_mut().for_each(|f| *f = DVec2::ZERO);

        for i in 0..n {
            for j in (i + 1)..n {
                let d = minimum_image_vec(positions[i] - positions[j], self.box_length);
                let r2 = d.length_squared();
                if r2 >= self.cutoff_sq {
                    continue;
                }
                if r2 == 0.0 {
                    return Err(SimError::CoincidentParticles { i, j });
                }
                if let Some(fij) = self.pair_force(d) {
                    forces[i] += fij;
                    forces[j] -= fij;
                }
            }
        }

        Ok(())
    }

    /// Total shifted potential energy of the ensemble
    pub fn potential_energy(&self, ensemble: &Ensemble) -> f64 {
        let positions = &ensemble.positions;
        let mut energy = 0.0;
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let d = minimum_image_vec(positions[i] - positions[j], self.box_length);
                energy += self.shifted_pair_potential(d.length_squared());
            }
        }
        energy
    }
}
