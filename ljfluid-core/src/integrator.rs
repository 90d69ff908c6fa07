use crate::boundary::wrap;
use crate::ensemble::Ensemble;
use crate::error::SimError;
use crate::forces::LennardJones;
use glam::DVec2;

/// Velocity Verlet stepper for a single-mass system
///
/// Owns the buffer that holds the previous step's forces so stepping does not
/// allocate.
#[derive(Debug, Clone)]
pub struct VelocityVerlet {
    pub dt: f64,
    pub mass: f64,
    pub box_length: f64,
    force_old: Vec<DVec2>,
}

impl VelocityVerlet {
    pub fn new(dt: f64, mass: f64, box_length: f64) -> Self {
        Self {
            dt,
            mass,
            box_length,
            force_old: Vec::new(),
        }
    }

    /// Advance the ensemble by one time step
    ///
    /// Expects `ensemble.forces` to be current for `ensemble.positions`. The
    /// order is fixed: positions, then forces at the new positions, then
    /// velocities from the average of old and new forces.
    pub fn step(&mut self, ensemble: &mut Ensemble, field: &LennardJones) -> Result<(), SimError> {
        let dt = self.dt;
        let half_dt = 0.5 * dt;
        let inv_mass = 1.0 / self.mass;

        // x += v dt + ½ dt² f/m
        for (i, (pos, (vel, force))) in ensemble
            .positions
            .iter_mut()
            .zip(ensemble.velocities.iter().zip(ensemble.forces.iter()))
            .enumerate()
        {
            let moved = *pos + *vel * dt + *force * (half_dt * dt * inv_mass);
            if !moved.is_finite() {
                return Err(SimError::NonFinite { particle: i });
            }
            *pos = DVec2::new(
                wrap_axis(moved.x, self.box_length, i)?,
                wrap_axis(moved.y, self.box_length, i)?,
            );
        }

        self.force_old.clone_from(&ensemble.forces);

        field.compute_forces(ensemble)?;

        for (vel, (old, new)) in ensemble
            .velocities
            .iter_mut()
            .zip(self.force_old.iter().zip(ensemble.forces.iter()))
        {
            *vel += (*old + *new) * (half_dt * inv_mass);
        }

        Ok(())
    }
}

fn wrap_axis(x: f64, box_length: f64, particle: usize) -> Result<f64, SimError> {
    wrap(x, box_length).ok_or(SimError::ParticleEscaped {
        particle,
        coordinate: x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_particle_moves_in_straight_line() {
        let field = LennardJones::new(1.0, 1.0, 3.0, 10.0);
        let mut ensemble = Ensemble::new(vec![DVec2::new(1.0, 1.0)], vec![DVec2::new(2.0, -1.0)]);
        let mut verlet = VelocityVerlet::new(0.01, 1.0, 10.0);

        verlet.step(&mut ensemble, &field).unwrap();

        assert!((ensemble.positions[0] - DVec2::new(1.02, 0.99)).length() < 1e-12);
        assert_eq!(ensemble.velocities[0], DVec2::new(2.0, -1.0));
    }

    #[test]
    fn test_nan_velocity_is_reported() {
        let field = LennardJones::new(1.0, 1.0, 3.0, 10.0);
        let mut ensemble = Ensemble::new(vec![DVec2::new(1.0, 1.0)], vec![DVec2::new(f64::NAN, 0.0)]);
        let mut verlet = VelocityVerlet::new(0.01, 1.0, 10.0);

        let err = verlet.step(&mut ensemble, &field).unwrap_err();
        assert_eq!(err, SimError::NonFinite { particle: 0 });
    }
}
