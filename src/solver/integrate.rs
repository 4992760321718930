//! Damped Verlet integration.
//!
//! Velocity is reconstructed from the position history each sub-step, so
//! the later stages (contacts, containment) steer particles by mutating
//! `position` alone and the next step's velocity picks the change up
//! automatically.

use crate::core::Particle;
use crate::math::Real;

/// Advance every particle by one sub-step of size `dt`.
pub fn advance(particles: &mut [Particle], damping: Real, dt: Real) {
    let dt_sq = dt * dt;
    for particle in particles.iter_mut() {
        let velocity = (particle.position - particle.previous_position) * damping;
        particle.previous_position = particle.position;
        particle.position += velocity + particle.acceleration * dt_sq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    #[test]
    fn advances_by_velocity_plus_acceleration() {
        let mut particles = vec![Particle::spawned_at(Vec2::ZERO, 2.5)];
        particles[0].previous_position = Vec2::ZERO;
        particles[0].position = Vec2::new(1.0, 2.0);
        particles[0].acceleration = Vec2::new(0.0, 100.0);

        advance(&mut particles, 0.999, 0.1);

        let p = &particles[0];
        assert_eq!(p.previous_position, Vec2::new(1.0, 2.0));
        assert!((p.position.x - 1.999).abs() < 1e-6);
        assert!((p.position.y - 4.998).abs() < 1e-6);
    }

    #[test]
    fn particle_at_rest_stays_at_rest_without_acceleration() {
        let mut particles = vec![Particle::spawned_at(Vec2::new(5.0, 5.0), 2.5)];
        for _ in 0..10 {
            advance(&mut particles, 0.999, 0.002);
        }
        assert_eq!(particles[0].position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn speed_is_non_increasing_under_damping_alone() {
        let mut particles = vec![Particle::spawned_at(Vec2::ZERO, 2.5)];
        particles[0].position = Vec2::new(0.5, -0.3);

        let initial_speed = particles[0].speed();
        let mut last_speed = initial_speed;
        for _ in 0..100 {
            advance(&mut particles, 0.999, 0.002);
            let speed = particles[0].speed();
            assert!(speed <= last_speed + 1e-9);
            last_speed = speed;
        }
        assert!(last_speed < initial_speed);
    }
}
