pub mod boundary;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod forces;
pub mod init;
pub mod integrator;
pub mod observables;
pub mod runtime;

pub use boundary::{minimum_image, minimum_image_vec, wrap};
pub use config::{LatticeFill, SimConfig};
pub use ensemble::{Ensemble, ParticleState};
pub use error::{ConfigError, Error, SimError};
pub use forces::LennardJones;
pub use integrator::VelocityVerlet;
pub use runtime::{Frame, RunSummary, Simulation};
