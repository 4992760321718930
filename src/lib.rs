use bevy::prelude::*;

pub mod config;
pub mod constants;
pub mod core;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::SimParams;
pub use crate::core::{FluidState, FrameInput, Particle, ParticleSet, SpatialGrid};
pub use crate::solver::Vessel;

use crate::core::{apply_frame_commands, step_simulation};

pub struct FluidPlugin;

impl Plugin for FluidPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameInput>();
        app.insert_resource(FluidState::new(SimParams::default()));
        app.add_systems(Update, (apply_frame_commands, step_simulation).chain());
    }
}
