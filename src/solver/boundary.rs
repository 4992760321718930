//! Rectangular vessel containment.
//!
//! Only the bottom, left and right edges are enforced; the top edge is
//! deliberately open so particles can fall into the vessel from above but
//! are held once inside.

use crate::constants::{AREA_HEIGHT, AREA_WIDTH};
use crate::core::Particle;
use crate::math::Real;

/// Fixed rectangular containment region, in sim space (y-down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vessel {
    pub left: Real,
    pub right: Real,
    pub top: Real,
    pub bottom: Real,
}

impl Default for Vessel {
    fn default() -> Self {
        Self::from_area(AREA_WIDTH, AREA_HEIGHT)
    }
}

impl Vessel {
    /// Vessel proportions relative to the simulation area: centered
    /// horizontally at 80% width, occupying the lower half vertically.
    pub fn from_area(area_width: Real, area_height: Real) -> Self {
        let left = area_width * 0.1;
        let top = area_height * 0.4;
        Self {
            left,
            right: left + area_width * 0.8,
            top,
            bottom: top + area_height * 0.5,
        }
    }

    pub fn width(&self) -> Real {
        self.right - self.left
    }

    pub fn height(&self) -> Real {
        self.bottom - self.top
    }

    /// True when a particle center is inside the vessel rectangle expanded
    /// outward by the given radius. Only such particles are clamped.
    #[inline(always)]
    fn engages(&self, particle: &Particle) -> bool {
        let p = particle.position;
        let r = particle.radius;
        p.x > self.left - r && p.x < self.right + r && p.y > self.top - r && p.y < self.bottom + r
    }

    /// Clamp every engaged particle against the bottom and side walls.
    /// Idempotent: a second application changes nothing.
    pub fn contain(&self, particles: &mut [Particle]) {
        for particle in particles.iter_mut() {
            if !self.engages(particle) {
                continue;
            }
            let r = particle.radius;
            if particle.position.y > self.bottom - r {
                particle.position.y = self.bottom - r;
            }
            if particle.position.x < self.left + r {
                particle.position.x = self.left + r;
            }
            if particle.position.x > self.right - r {
                particle.position.x = self.right - r;
            }
        }
    }
}
