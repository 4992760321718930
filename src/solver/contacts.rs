//! Pairwise overlap resolution.
//!
//! Overlapping pairs found through the grid's 3x3 neighborhood scan are
//! pushed apart by two terms: a velocity-like penalty impulse scaled by the
//! relative overlap and the sub-step size, and a direct positional
//! correction of a fixed fraction of the overlap. Both act on positions
//! only, so the Verlet velocity picks up the push on the next sub-step.
//!
//! The symmetric scan visits each unordered pair twice per sub-step (once
//! rooted at each particle) and applies the correction both times; the
//! pressure constant is tuned against that double application.

use crate::constants::{CONTACT_EPSILON_SQ, POSITION_CORRECTION};
use crate::core::{Particle, SpatialGrid};
use crate::math::Real;

/// Resolve every overlapping pair reachable through the grid. The grid
/// must have been rebuilt from the current positions this sub-step;
/// corrections applied here are picked up by the next rebuild.
pub fn resolve_overlaps(
    grid: &SpatialGrid,
    particles: &mut [Particle],
    pressure_constant: Real,
    dt: Real,
) {
    for i in 0..particles.len() {
        let center = particles[i].position;
        for j in grid.neighbors(center) {
            if i == j {
                continue;
            }

            let axis = particles[i].position - particles[j].position;
            let dist_sq = axis.length_squared();
            let min_dist = particles[i].radius + particles[j].radius;
            if dist_sq >= min_dist * min_dist || dist_sq <= CONTACT_EPSILON_SQ {
                continue;
            }

            let dist = dist_sq.sqrt();
            let normal = axis / dist;
            let overlap = min_dist - dist;

            let pressure_force = (overlap / min_dist) * pressure_constant;
            let impulse = normal * pressure_force * dt;
            particles[i].position += impulse;
            particles[j].position -= impulse;

            let ratio = 0.5 * overlap / dist;
            let correction = axis * ratio * POSITION_CORRECTION;
            particles[i].position += correction;
            particles[j].position -= correction;
        }
    }
}
