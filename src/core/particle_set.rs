//! Contiguous particle storage.
//!
//! The set is the single owner of particle state; the grid and the solver
//! stages refer to particles by index only. Any parallel per-index
//! structure (the grid's `next` array) must be resized in lockstep after
//! additions or removals.

use crate::core::Particle;
use crate::math::{Real, Vector};

#[derive(Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Add a particle at rest and return its index.
    pub fn spawn(&mut self, position: Vector, radius: Real) -> usize {
        let index = self.particles.len();
        self.particles.push(Particle::spawned_at(position, radius));
        index
    }

    pub fn push(&mut self, particle: Particle) -> usize {
        let index = self.particles.len();
        self.particles.push(particle);
        index
    }

    /// Drop every particle matching the predicate, compacting the store
    /// while preserving the relative order of survivors. Returns the number
    /// of particles removed.
    pub fn remove_where(&mut self, predicate: impl Fn(&Particle) -> bool) -> usize {
        let before = self.particles.len();
        self.particles.retain(|particle| !predicate(particle));
        before - self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }
}
