//! Simulated mass points.
//!
//! Velocity is never stored: it is implied by the gap between `position`
//! and `previous_position`, which is what lets the contact and boundary
//! stages steer particles by editing positions directly.

use crate::math::{Real, Vector, zero_vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector,
    pub previous_position: Vector,
    pub acceleration: Vector,
    pub radius: Real,
}

impl Particle {
    /// Spawn at rest: `previous_position == position` means zero implicit
    /// velocity on the first integration step.
    pub fn spawned_at(position: Vector, radius: Real) -> Self {
        Self {
            position,
            previous_position: position,
            acceleration: zero_vector(),
            radius,
        }
    }

    /// Implicit velocity over the last sub-step.
    #[inline(always)]
    pub fn velocity(&self) -> Vector {
        self.position - self.previous_position
    }

    /// Instantaneous speed, in displacement-per-sub-step units. Scale by
    /// [`crate::constants::SPEED_COLOR_SCALE`] for the color encoding.
    #[inline(always)]
    pub fn speed(&self) -> Real {
        self.velocity().length()
    }
}
