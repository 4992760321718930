//! External force field.
//!
//! Every particle feels constant gravity; particles inside the pointer's
//! interaction range additionally feel a fixed-magnitude radial term,
//! attracting while the secondary button is held and repelling otherwise.
//! The default repulsion is suppressed while the spawn button is held so
//! freshly spawned particles are not blasted away from the cursor.

use crate::constants::{ATTRACT_ACCELERATION, FORCE_EPSILON_SQ, GRAVITY, REPEL_ACCELERATION};
use crate::core::Particle;
use crate::math::{Real, Vector};

/// Per-frame pointer state as seen by the force field.
#[derive(Clone, Copy, Debug)]
pub struct PointerField {
    pub position: Vector,
    /// Interaction range; the radial term is zero beyond it.
    pub distance: Real,
    /// Secondary button held: attract instead of repel.
    pub attracting: bool,
    /// Primary button held: suppress the default repulsion.
    pub spawning: bool,
}

/// Reset and refill every particle's acceleration accumulator for one
/// sub-step.
pub fn accumulate_accelerations(particles: &mut [Particle], pointer: &PointerField) {
    let range_sq = pointer.distance * pointer.distance;

    for particle in particles.iter_mut() {
        particle.acceleration = GRAVITY;

        let offset = particle.position - pointer.position;
        let dist_sq = offset.length_squared();
        // Coincident pointer and particle: direction undefined, skip the
        // radial term.
        if dist_sq >= range_sq || dist_sq <= FORCE_EPSILON_SQ {
            continue;
        }

        let direction = offset / dist_sq.sqrt();
        if pointer.attracting {
            particle.acceleration -= direction * ATTRACT_ACCELERATION;
        } else if !pointer.spawning {
            particle.acceleration += direction * REPEL_ACCELERATION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    fn pointer_at(position: Vec2) -> PointerField {
        PointerField {
            position,
            distance: 37.5,
            attracting: false,
            spawning: false,
        }
    }

    fn single_at(position: Vec2) -> Vec<Particle> {
        vec![Particle::spawned_at(position, 2.5)]
    }

    #[test]
    fn gravity_only_outside_interaction_range() {
        let mut particles = single_at(Vec2::new(100.0, 100.0));
        accumulate_accelerations(&mut particles, &pointer_at(Vec2::ZERO));
        assert_eq!(particles[0].acceleration, GRAVITY);
    }

    #[test]
    fn default_mode_repels_away_from_pointer() {
        let mut particles = single_at(Vec2::new(10.0, 0.0));
        accumulate_accelerations(&mut particles, &pointer_at(Vec2::ZERO));
        assert_eq!(
            particles[0].acceleration,
            GRAVITY + Vec2::new(REPEL_ACCELERATION, 0.0)
        );
    }

    #[test]
    fn attract_mode_pulls_toward_pointer() {
        let mut particles = single_at(Vec2::new(10.0, 0.0));
        let pointer = PointerField {
            attracting: true,
            ..pointer_at(Vec2::ZERO)
        };
        accumulate_accelerations(&mut particles, &pointer);
        assert_eq!(
            particles[0].acceleration,
            GRAVITY - Vec2::new(ATTRACT_ACCELERATION, 0.0)
        );
    }

    #[test]
    fn repulsion_is_suppressed_while_spawning() {
        let mut particles = single_at(Vec2::new(10.0, 0.0));
        let pointer = PointerField {
            spawning: true,
            ..pointer_at(Vec2::ZERO)
        };
        accumulate_accelerations(&mut particles, &pointer);
        assert_eq!(particles[0].acceleration, GRAVITY);
    }

    #[test]
    fn attraction_still_applies_while_spawning() {
        let mut particles = single_at(Vec2::new(0.0, 10.0));
        let pointer = PointerField {
            spawning: true,
            attracting: true,
            ..pointer_at(Vec2::ZERO)
        };
        accumulate_accelerations(&mut particles, &pointer);
        assert_eq!(
            particles[0].acceleration,
            GRAVITY - Vec2::new(0.0, ATTRACT_ACCELERATION)
        );
    }

    #[test]
    fn coincident_pointer_skips_the_radial_term() {
        let mut particles = single_at(Vec2::new(50.0, 50.0));
        accumulate_accelerations(&mut particles, &pointer_at(Vec2::new(50.0, 50.0)));
        assert_eq!(particles[0].acceleration, GRAVITY);
        assert!(particles[0].acceleration.is_finite());
    }

    #[test]
    fn accumulator_is_cleared_every_call() {
        let mut particles = single_at(Vec2::new(100.0, 100.0));
        particles[0].acceleration = Vec2::new(9999.0, 9999.0);
        accumulate_accelerations(&mut particles, &pointer_at(Vec2::ZERO));
        assert_eq!(particles[0].acceleration, GRAVITY);
    }
}
