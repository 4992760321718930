//! Aggregate simulation state and the per-frame step controller.
//!
//! [`FluidState`] owns everything mutable in the simulation (particle
//! store, spatial grid, parameters, vessel) and advances it synchronously:
//! a whole frame step completes inside one system before anything reads
//! the output. [`FrameInput`] is the narrow interface the presentation
//! layer writes each frame.

use bevy::log::info;
use bevy::prelude::*;
use rand::Rng;

use crate::config::SimParams;
use crate::config::sim_params::clamp_radius;
use crate::constants::{
    ESCAPE_MARGIN, MAX_FRAME_DT, SPAWN_JITTER_MAX, SPAWN_JITTER_MIN, SPAWN_PER_TICK,
};
use crate::core::{ParticleSet, SpatialGrid};
use crate::math::{Real, Vector};
use crate::solver::{self, PointerField, Vessel};

/// Per-frame input from the presentation layer.
///
/// `reset` and `radius_delta` are one-shot commands, consumed by
/// [`apply_frame_commands`]; the booleans are level-sampled button state.
#[derive(Resource, Clone, Debug)]
pub struct FrameInput {
    /// Pointer position in sim space.
    pub pointer: Vector,
    /// Primary button held: spawn a burst this frame and suppress the
    /// default repulsion.
    pub spawning: bool,
    /// Secondary button held: attract toward the pointer.
    pub attracting: bool,
    /// Clear all particles.
    pub reset: bool,
    /// Accumulated grow/shrink request for the global radius.
    pub radius_delta: Real,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            pointer: Vector::ZERO,
            spawning: false,
            attracting: false,
            reset: false,
            radius_delta: 0.0,
        }
    }
}

/// Aggregate simulation state for the stepping loop.
#[derive(Resource)]
pub struct FluidState {
    set: ParticleSet,
    grid: SpatialGrid,
    params: SimParams,
    vessel: Vessel,
}

impl Default for FluidState {
    fn default() -> Self {
        Self::new(SimParams::default())
    }
}

impl FluidState {
    pub fn new(params: SimParams) -> Self {
        let grid = SpatialGrid::new(params.area_width, params.area_height, params.cell_size());
        let vessel = Vessel::from_area(params.area_width, params.area_height);
        Self {
            set: ParticleSet::new(),
            grid,
            params,
            vessel,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.set.len()
    }

    pub fn particles(&self) -> &[crate::core::Particle] {
        self.set.particles()
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn vessel(&self) -> &Vessel {
        &self.vessel
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Spawn a single particle at rest with the current global radius.
    pub fn spawn_at(&mut self, position: Vector) -> usize {
        let index = self.set.spawn(position, self.params.radius);
        self.grid.resize_particles(self.set.len());
        index
    }

    /// Spawn a burst of particles scattered around `center`, at rest, with
    /// the current global radius. The grid's per-particle bookkeeping grows
    /// in lockstep.
    pub fn spawn_burst(&mut self, center: Vector, rng: &mut impl Rng) {
        for _ in 0..SPAWN_PER_TICK {
            let jitter = Vector::new(
                rng.random_range(SPAWN_JITTER_MIN..SPAWN_JITTER_MAX),
                rng.random_range(SPAWN_JITTER_MIN..SPAWN_JITTER_MAX),
            );
            self.set.spawn(center + jitter, self.params.radius);
        }
        self.grid.resize_particles(self.set.len());
    }

    /// Remove every particle.
    pub fn reset(&mut self) {
        self.set.clear();
        self.grid.resize_particles(0);
        self.grid.clear();
    }

    /// Change the global particle radius by `delta`, clamped to the
    /// supported range.
    ///
    /// This is an atomic reconfiguration: the stored radius, every live
    /// particle's radius and the grid geometry (cell size derives from the
    /// radius) all change together, before the next sub-step runs. A stale
    /// cell size would let close contacts slip through the 3x3 scan.
    pub fn adjust_radius(&mut self, delta: Real) {
        self.reconfigure(self.params.radius + delta);
    }

    pub fn reconfigure(&mut self, radius: Real) {
        let radius = clamp_radius(radius);
        self.params.radius = radius;
        self.grid.configure(
            self.params.area_width,
            self.params.area_height,
            self.params.cell_size(),
        );
        self.grid.resize_particles(self.set.len());
        for particle in self.set.iter_mut() {
            particle.radius = radius;
        }
    }

    /// Advance the simulation by one frame of wall-clock duration `dt`.
    ///
    /// `dt` is capped so a frame hitch cannot blow up the sub-step size;
    /// the capped interval is divided into fixed sub-steps, each running
    /// force field, integration, grid rebuild, overlap resolution and
    /// containment in that order. Whole-step bookkeeping (escape culling,
    /// grid resize) happens once at the end.
    pub fn step(&mut self, input: &FrameInput, dt: Real) {
        let sub_dt = dt.min(MAX_FRAME_DT) / self.params.substeps as Real;
        let pointer = PointerField {
            position: input.pointer,
            distance: self.params.interaction_distance(),
            attracting: input.attracting,
            spawning: input.spawning,
        };

        for _ in 0..self.params.substeps {
            solver::accumulate_accelerations(self.set.particles_mut(), &pointer);
            solver::advance(self.set.particles_mut(), self.params.damping, sub_dt);

            self.grid.clear();
            for (index, particle) in self.set.iter().enumerate() {
                self.grid.insert(index, particle.position);
            }

            solver::resolve_overlaps(
                &self.grid,
                self.set.particles_mut(),
                self.params.pressure_constant,
                sub_dt,
            );
            self.vessel.contain(self.set.particles_mut());
        }

        self.cull_escaped();
    }

    /// Drop particles that drifted past the escape margin on the bottom,
    /// left or right (the open top is the inflow path) and shrink the
    /// grid's bookkeeping to match.
    fn cull_escaped(&mut self) {
        let width = self.params.area_width;
        let height = self.params.area_height;
        let removed = self.set.remove_where(|particle| {
            let p = particle.position;
            p.y > height + ESCAPE_MARGIN || p.x < -ESCAPE_MARGIN || p.x > width + ESCAPE_MARGIN
        });
        if removed > 0 {
            self.grid.resize_particles(self.set.len());
        }
    }
}

/// Consume the frame's one-shot commands and spawn requests.
pub fn apply_frame_commands(mut input: ResMut<FrameInput>, mut state: ResMut<FluidState>) {
    if input.reset {
        input.reset = false;
        state.reset();
        info!("simulation reset");
    }

    if input.radius_delta != 0.0 {
        let delta = std::mem::take(&mut input.radius_delta);
        state.adjust_radius(delta);
        info!(
            radius = state.params().radius,
            interaction = state.params().interaction_distance(),
            "particle radius reconfigured"
        );
    }

    if input.spawning {
        let pointer = input.pointer;
        let mut rng = rand::rng();
        state.spawn_burst(pointer, &mut rng);
    }
}

/// Run one full physics step for the frame.
pub fn step_simulation(time: Res<Time>, input: Res<FrameInput>, mut state: ResMut<FluidState>) {
    state.step(&input, time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_RADIUS, MAX_RADIUS, MIN_RADIUS};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn quiet_input() -> FrameInput {
        FrameInput {
            pointer: Vector::new(-1000.0, -1000.0),
            ..FrameInput::default()
        }
    }

    #[test]
    fn spawn_burst_adds_particles_at_rest_and_tracks_the_grid() {
        let mut state = FluidState::default();
        let mut rng = SmallRng::seed_from_u64(7);

        state.spawn_burst(Vector::new(250.0, 100.0), &mut rng);
        assert_eq!(state.particle_count(), SPAWN_PER_TICK);
        assert_eq!(state.grid().tracked_particles(), SPAWN_PER_TICK);

        for particle in state.particles() {
            assert_eq!(particle.velocity(), Vector::ZERO);
            assert_eq!(particle.radius, DEFAULT_RADIUS);
            let offset = particle.position - Vector::new(250.0, 100.0);
            assert!(offset.x >= SPAWN_JITTER_MIN && offset.x < SPAWN_JITTER_MAX);
            assert!(offset.y >= SPAWN_JITTER_MIN && offset.y < SPAWN_JITTER_MAX);
        }
    }

    #[test]
    fn escaped_particles_are_culled_within_one_step() {
        let mut state = FluidState::default();
        let mut rng = SmallRng::seed_from_u64(7);
        state.spawn_burst(Vector::new(250.0, 100.0), &mut rng);

        // Push one survivor's worth of particles far past each margin.
        let height = state.params().area_height;
        let width = state.params().area_width;
        {
            let mut escaped = [
                Vector::new(250.0, height + ESCAPE_MARGIN + 50.0),
                Vector::new(-ESCAPE_MARGIN - 50.0, 300.0),
                Vector::new(width + ESCAPE_MARGIN + 50.0, 300.0),
            ]
            .into_iter();
            for particle in state.set.iter_mut().take(3) {
                let p = escaped.next().unwrap();
                particle.position = p;
                particle.previous_position = p;
            }
        }

        state.step(&quiet_input(), 1.0 / 60.0);
        assert_eq!(state.particle_count(), SPAWN_PER_TICK - 3);
        assert_eq!(state.grid().tracked_particles(), SPAWN_PER_TICK - 3);
    }

    #[test]
    fn reset_clears_store_and_grid_bookkeeping() {
        let mut state = FluidState::default();
        let mut rng = SmallRng::seed_from_u64(7);
        state.spawn_burst(Vector::new(250.0, 100.0), &mut rng);

        state.reset();
        assert_eq!(state.particle_count(), 0);
        assert_eq!(state.grid().tracked_particles(), 0);
    }

    #[test]
    fn radius_reconfiguration_is_atomic() {
        let mut state = FluidState::default();
        let mut rng = SmallRng::seed_from_u64(7);
        state.spawn_burst(Vector::new(250.0, 100.0), &mut rng);

        state.adjust_radius(1.5);
        let radius = DEFAULT_RADIUS + 1.5;
        assert_eq!(state.params().radius, radius);
        assert_eq!(state.grid().cell_size(), state.params().cell_size());
        assert_eq!(state.params().interaction_distance(), radius * 15.0);
        for particle in state.particles() {
            assert_eq!(particle.radius, radius);
        }
        assert_eq!(state.grid().tracked_particles(), state.particle_count());
    }

    #[test]
    fn radius_reconfiguration_clamps_at_both_ends() {
        let mut state = FluidState::default();
        state.adjust_radius(-100.0);
        assert_eq!(state.params().radius, MIN_RADIUS);
        state.adjust_radius(100.0);
        assert_eq!(state.params().radius, MAX_RADIUS);
    }

    #[test]
    fn frame_dt_is_capped_before_substepping() {
        let mut state = FluidState::default();
        let start = Vector::new(250.0, 100.0);
        state.spawn_at(start);

        // An uncapped 10 s frame would fling the particle thousands of
        // units; capped free fall over 8 sub-steps moves it well under one.
        state.step(&quiet_input(), 10.0);
        let moved = state.particles()[0].position.distance(start);
        assert!(moved < 1.0, "moved {moved}");
    }

    #[test]
    fn settled_particles_stay_inside_the_vessel() {
        let mut state = FluidState::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let vessel = *state.vessel();
        let drop_point = Vector::new(
            (vessel.left + vessel.right) / 2.0,
            vessel.top + vessel.height() / 2.0,
        );
        state.spawn_burst(drop_point, &mut rng);
        state.spawn_burst(drop_point, &mut rng);

        for _ in 0..120 {
            state.step(&quiet_input(), 1.0 / 60.0);
        }

        assert_eq!(state.particle_count(), 2 * SPAWN_PER_TICK);
        for particle in state.particles() {
            assert!(particle.position.is_finite());
            let r = particle.radius;
            assert!(particle.position.x >= vessel.left + r - 1e-3);
            assert!(particle.position.x <= vessel.right - r + 1e-3);
            assert!(particle.position.y <= vessel.bottom - r + 1e-3);
        }
    }
}
