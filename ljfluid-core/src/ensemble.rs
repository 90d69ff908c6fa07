use glam::DVec2;

/// Per-particle state of a single-species system, stored as parallel arrays
#[derive(Debug, Clone)]
pub struct Ensemble {
    pub positions: Vec<DVec2>,
    pub velocities: Vec<DVec2>,
    /// Net force on each particle as of the last force evaluation
    pub forces: Vec<DVec2>,
}

/// Snapshot of one particle, handed out to consumers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub index: usize,
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Ensemble {
    /// Build an ensemble from positions and velocities, with forces zeroed
    ///
    /// Panics if the two slices differ in length.
    pub fn new(positions: Vec<DVec2>, velocities: Vec<DVec2>) -> Self {
        assert_eq!(
            positions.len(),
            velocities.len(),
            "positions and velocities must describe the same particles"
        );
        let forces = vec![DVec2::ZERO; positions.len()];
        Self {
            positions,
            velocities,
            forces,
        }
    }

    /// Particles at rest at the given positions
    pub fn at_rest(positions: Vec<DVec2>) -> Self {
        let velocities = vec![DVec2::ZERO; positions.len()];
        Self::new(positions, velocities)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn particle(&self, index: usize) -> ParticleState {
        ParticleState {
            index,
            pos: self.positions[index],
            vel: self.velocities[index],
        }
    }

    pub fn particles(&self) -> impl Iterator<Item = ParticleState> + '_ {
        (0..self.len()).map(|i| self.particle(i))
    }
}
