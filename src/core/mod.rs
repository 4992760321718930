pub mod grid;
pub mod particle;
pub mod particle_set;
pub mod state;

pub use grid::{NIL, Neighbors, SpatialGrid};
pub use particle::Particle;
pub use particle_set::ParticleSet;
pub use state::{FluidState, FrameInput, apply_frame_commands, step_simulation};
