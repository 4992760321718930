use bevy::prelude::*;

use crate::constants;
use crate::math::Real;

/// Simulation parameters shared by every solver stage.
///
/// The particle radius is the one live-tunable value; everything derived
/// from it (grid cell size, pointer interaction range) is recomputed through
/// the accessors so the three can never drift apart.
#[derive(Resource, Clone)]
pub struct SimParams {
    /// Simulation area width in sim units (pixels).
    pub area_width: Real,

    /// Simulation area height in sim units (pixels).
    pub area_height: Real,

    /// Global collision radius applied to every particle.
    pub radius: Real,

    /// Velocity retention per sub-step (< 1.0).
    pub damping: Real,

    /// Penalty impulse strength for overlapping pairs.
    pub pressure_constant: Real,

    /// Fixed number of sub-steps per frame.
    pub substeps: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            area_width: constants::AREA_WIDTH,
            area_height: constants::AREA_HEIGHT,
            radius: constants::DEFAULT_RADIUS,
            damping: constants::DAMPING,
            pressure_constant: constants::PRESSURE_CONSTANT,
            substeps: constants::SUBSTEPS,
        }
    }
}

impl SimParams {
    /// Parameters for a custom area size.
    pub fn with_area(width: Real, height: Real) -> Self {
        Self {
            area_width: width,
            area_height: height,
            ..Self::default()
        }
    }

    /// Set the global radius, clamped to the supported range.
    pub fn with_radius(mut self, radius: Real) -> Self {
        self.radius = clamp_radius(radius);
        self
    }

    /// Grid cell edge length. Kept proportional to the radius so each cell
    /// holds O(1) particles and the 3x3 scan covers every contact pair.
    pub fn cell_size(&self) -> Real {
        self.radius * constants::CELL_SIZE_FACTOR
    }

    /// Range of the pointer attraction/repulsion field.
    pub fn interaction_distance(&self) -> Real {
        self.radius * constants::INTERACTION_FACTOR
    }
}

/// Clamp a requested radius into the supported range. Applied at the
/// reconfiguration boundary so no other component ever sees an out-of-range
/// radius or a non-positive cell size.
pub fn clamp_radius(radius: Real) -> Real {
    radius.clamp(constants::MIN_RADIUS, constants::MAX_RADIUS)
}
