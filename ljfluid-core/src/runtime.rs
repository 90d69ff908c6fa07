use crate::config::SimConfig;
use crate::ensemble::{Ensemble, ParticleState};
use crate::error::{ConfigError, Error};
use crate::forces::LennardJones;
use crate::init::initialize;
use crate::integrator::VelocityVerlet;
use crate::observables::{total_energy, EnergyMonitor};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::ControlFlow;
use std::time::{SystemTime, UNIX_EPOCH};

/// Read-only view of the system handed to consumers after each step
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub step: u64,
    pub time: f64,
    pub positions: &'a [DVec2],
    pub box_length: f64,
    /// Suggested drawing radius for every particle
    pub radius: f64,
}

/// Outcome of [`Simulation::run`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps_completed: u64,
    /// True when the consumer stopped the run before the step budget ran out
    pub cancelled: bool,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub energy_drift: f64,
}

/// Owns the ensemble and everything needed to advance it
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    ensemble: Ensemble,
    field: LennardJones,
    integrator: VelocityVerlet,
    monitor: EnergyMonitor,
    current_step: u64,
    max_steps: Option<u64>,
    seed: u64,
}

impl Simulation {
    /// Validate the config, lay out the lattice, sample velocities and seed forces
    ///
    /// Uses `config.seed` if present, otherwise a seed derived from the clock.
    pub fn new(config: SimConfig) -> Result<Self, Error> {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sim = Self::with_rng(config, &mut rng)?;
        sim.seed = seed;
        log::info!(
            "initialized {} particles in a {} box (seed {})",
            sim.ensemble.len(),
            sim.config.box_length,
            seed
        );
        Ok(sim)
    }

    /// Same as [`Simulation::new`] but draws velocities from the given source
    ///
    /// The recorded seed is `config.seed`, or 0 when the config has none.
    pub fn with_rng<R: Rng + ?Sized>(config: SimConfig, rng: &mut R) -> Result<Self, Error> {
        config.validate()?;
        let ensemble = initialize(&config, rng);
        Self::from_ensemble(config, ensemble)
    }

    /// Start from an explicit ensemble, e.g. a hand-built configuration
    ///
    /// `particle_count` and `lattice` are ignored in favour of the ensemble
    /// itself. Every position must already lie in `[0, L)`. Forces are
    /// recomputed so the first step sees consistent state.
    pub fn from_ensemble(mut config: SimConfig, mut ensemble: Ensemble) -> Result<Self, Error> {
        if ensemble.is_empty() {
            return Err(ConfigError::NoParticles.into());
        }
        config.particle_count = ensemble.len();
        config.validate_physics()?;
        check_ensemble(&ensemble, config.box_length)?;
        let field = LennardJones::from_config(&config);
        field
            .compute_forces(&mut ensemble)
            .map_err(|source| Error::Aborted { step: 0, source })?;

        let monitor = EnergyMonitor::new(total_energy(&ensemble, &field, config.mass));
        let integrator = VelocityVerlet::new(config.dt, config.mass, config.box_length);
        let max_steps = config.steps;
        let config_seed = config.seed.unwrap_or(0);

        Ok(Self {
            config,
            ensemble,
            field,
            integrator,
            monitor,
            current_step: 0,
            max_steps,
            seed: config_seed,
        })
    }

    /// Advance one step; returns `true` once the step budget is exhausted
    ///
    /// Stepping past the budget is a no-op. On error the ensemble is left as
    /// the failing step found it and should not be stepped further.
    pub fn step(&mut self) -> Result<bool, Error> {
        if self.is_finished() {
            return Ok(true);
        }

        let step = self.current_step + 1;
        self.integrator
            .step(&mut self.ensemble, &self.field)
            .map_err(|source| Error::Aborted { step, source })?;
        self.current_step = step;

        let interval = self.config.report_interval;
        if interval > 0 && step % interval == 0 {
            let energy = self.total_energy();
            log::info!(
                "step {}: E = {:.6}, drift = {:.3e}",
                step,
                energy,
                self.monitor.relative_drift(energy)
            );
        }

        Ok(self.is_finished())
    }

    /// Step until the budget runs out or `consumer` breaks, calling it after every step
    pub fn run<F>(&mut self, mut consumer: F) -> Result<RunSummary, Error>
    where
        F: FnMut(&Frame<'_>) -> ControlFlow<()>,
    {
        let start_step = self.current_step;
        let mut cancelled = false;

        while !self.is_finished() {
            self.step()?;
            if consumer(&self.frame()).is_break() {
                cancelled = !self.is_finished();
                break;
            }
        }

        let final_energy = self.total_energy();
        log::debug!(
            "run ended after {} steps (cancelled: {})",
            self.current_step - start_step,
            cancelled
        );

        Ok(RunSummary {
            steps_completed: self.current_step - start_step,
            cancelled,
            initial_energy: self.monitor.baseline,
            final_energy,
            energy_drift: self.monitor.relative_drift(final_energy),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of steps taken so far
    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    /// Seed the velocities were drawn with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_finished(&self) -> bool {
        self.max_steps
            .map_or(false, |max_steps| self.current_step >= max_steps)
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            step: self.current_step,
            time: self.current_step as f64 * self.config.dt,
            positions: &self.ensemble.positions,
            box_length: self.config.box_length,
            radius: 0.5 * self.config.sigma,
        }
    }

    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.ensemble.positions
    }

    pub fn velocities(&self) -> &[DVec2] {
        &self.ensemble.velocities
    }

    pub fn forces(&self) -> &[DVec2] {
        &self.ensemble.forces
    }

    pub fn field(&self) -> &LennardJones {
        &self.field
    }

    pub fn total_energy(&self) -> f64 {
        total_energy(&self.ensemble, &self.field, self.config.mass)
    }

    /// Energy at the end of initialization
    pub fn initial_energy(&self) -> f64 {
        self.monitor.baseline
    }

    /// Snapshot of every particle for display
    pub fn particle_states(&self) -> Vec<ParticleState> {
        self.ensemble.particles().collect()
    }
}

/// Reject ensembles whose arrays disagree or whose particles sit outside the box
fn check_ensemble(ensemble: &Ensemble, box_length: f64) -> Result<(), ConfigError> {
    let (positions, velocities, forces) = (
        ensemble.positions.len(),
        ensemble.velocities.len(),
        ensemble.forces.len(),
    );
    if velocities != positions || forces != positions {
        return Err(ConfigError::MismatchedLengths {
            positions,
            velocities,
            forces,
        });
    }

    let inside = |c: f64| (0.0..box_length).contains(&c);
    match ensemble
        .positions
        .iter()
        .position(|p| !(inside(p.x) && inside(p.y)))
    {
        Some(particle) => {
            let p = ensemble.positions[particle];
            Err(ConfigError::PositionOutsideBox {
                particle,
                x: p.x,
                y: p.y,
                box_length,
            })
        }
        None => Ok(()),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
