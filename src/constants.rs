// Tuned constants for the particle fluid simulation
use crate::math::{Real, Vector};

/// Constant downward acceleration, sim space is y-down.
pub const GRAVITY: Vector = Vector::new(0.0, 1000.0);

/// Velocity retention per sub-step; < 1 bleeds energy out of the system.
pub const DAMPING: Real = 0.999;

/// Strength of the penalty impulse between overlapping particles.
pub const PRESSURE_CONSTANT: Real = 500.0;

/// Fraction of the raw positional overlap correction actually applied.
pub const POSITION_CORRECTION: Real = 0.8;

/// Fixed sub-step count per rendered frame.
pub const SUBSTEPS: u32 = 8;

/// Frame dt is capped here so frame hitches cannot blow up a sub-step.
pub const MAX_FRAME_DT: Real = 0.016;

// Particle sizing
pub const DEFAULT_RADIUS: Real = 2.5;
pub const MIN_RADIUS: Real = 1.0;
pub const MAX_RADIUS: Real = 20.0;
pub const RADIUS_STEP: Real = 0.5;

/// Grid cell edge as a multiple of the particle radius. Must stay >= 2 so
/// any contact pair co-occupies or neighbors a cell in the 3x3 scan.
pub const CELL_SIZE_FACTOR: Real = 3.0;

/// Pointer interaction range as a multiple of the particle radius.
pub const INTERACTION_FACTOR: Real = 15.0;

// Pointer force magnitudes
pub const ATTRACT_ACCELERATION: Real = 25000.0;
pub const REPEL_ACCELERATION: Real = 8000.0;

/// Squared distance below which the pointer force direction is undefined.
pub const FORCE_EPSILON_SQ: Real = 0.1;

/// Squared distance below which a contact pair is treated as coincident.
pub const CONTACT_EPSILON_SQ: Real = 1e-4;

// Spawning
pub const SPAWN_PER_TICK: usize = 4;
pub const SPAWN_JITTER_MIN: Real = -20.0;
pub const SPAWN_JITTER_MAX: Real = 40.0;

/// Particles drifting this far outside the area are culled after the step.
pub const ESCAPE_MARGIN: Real = 100.0;

/// Multiplier turning per-sub-step displacement into the speed value used
/// for color encoding.
pub const SPEED_COLOR_SCALE: Real = 120.0;

// Default simulation area (pixels)
pub const AREA_WIDTH: Real = 500.0;
pub const AREA_HEIGHT: Real = 500.0;
