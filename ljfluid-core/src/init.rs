//! Initial particle placement and velocity sampling

use crate::config::{isqrt, LatticeFill, SimConfig};
use crate::ensemble::Ensemble;
use glam::DVec2;
use rand::Rng;

/// Place `count` particles at the centres of a square lattice spanning the box
///
/// Cells are filled row-major with the outer index along x, so the first
/// particles share the smallest x coordinate. With [`LatticeFill::ExtraRow`]
/// the lattice is sized up to `ceil(sqrt(count))` and trailing cells stay
/// empty; with [`LatticeFill::PerfectSquare`] the count is expected to be a
/// perfect square (enforced by [`SimConfig::validate`]).
pub fn lattice_positions(count: usize, box_length: f64, fill: LatticeFill) -> Vec<DVec2> {
    let root = isqrt(count);
    let side = match fill {
        LatticeFill::PerfectSquare => root,
        LatticeFill::ExtraRow if root * root == count => root,
        LatticeFill::ExtraRow => root + 1,
    };
    if side == 0 {
        return Vec::new();
    }

    let spacing = box_length / side as f64;
    (0..side)
        .flat_map(|i| (0..side).map(move |j| (i, j)))
        .take(count)
        .map(|(i, j)| DVec2::new((i as f64 + 0.5) * spacing, (j as f64 + 0.5) * spacing))
        .collect()
}

/// Uniform velocities in `[-0.5, 0.5)` per component, shifted to zero mean
pub fn sample_velocities<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<DVec2> {
    let mut velocities: Vec<DVec2> = (0..count)
        .map(|_| DVec2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5)))
        .collect();
    remove_drift(&mut velocities);
    velocities
}

/// Subtract the mean velocity so the total momentum is zero
pub fn remove_drift(velocities: &mut [DVec2]) {
    if velocities.is_empty() {
        return;
    }
    let mean = velocities.iter().copied().sum::<DVec2>() / velocities.len() as f64;
    for v in velocities.iter_mut() {
        *v -= mean;
    }
}

/// Lattice positions plus sampled velocities, forces left at zero
pub fn initialize<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Ensemble {
    let positions = lattice_positions(config.particle_count, config.box_length, config.lattice);
    let velocities = sample_velocities(positions.len(), rng);
    Ensemble::new(positions, velocities)
}
