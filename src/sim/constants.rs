//! Simulation constants
//!
//! All values are in scene units (one unit is one pixel at zoom 1.0) and
//! "frame units" of time, where one frame unit is one 60 Hz frame at 1x speed.

/// Time scaling
pub mod time {
    /// Converts elapsed milliseconds into frame units: delta = ms * speed * MS_TO_DELTA
    pub const MS_TO_DELTA: f32 = 0.06;
    /// Interval between proximity classification passes (milliseconds)
    pub const CLASSIFY_INTERVAL_MS: u64 = 500;
    /// Default animation frame period for the headless runner (milliseconds)
    pub const FRAME_MS: u64 = 16;
    /// Accepted simulation speed multipliers
    pub const MIN_SPEED: f32 = 0.1;
    pub const MAX_SPEED: f32 = 10.0;
}

/// Spacecraft kinematics
pub mod physics {
    /// Velocity multiplier applied once per tick after thrust and AI
    pub const DRAG_FACTOR: f32 = 0.99;
    /// Velocity increment per active directional flag, per frame unit
    pub const THRUST_POWER: f32 = 0.01;
    /// Chance per tick of an idle perturbation when AI is off and no input is held
    pub const PERTURBATION_PROBABILITY: f64 = 0.05;
    /// Half-width of the uniform perturbation added to each velocity axis
    pub const PERTURBATION_HALF_WIDTH: f32 = 0.005;
}

/// AI steering
pub mod ai {
    /// Base avoidance strength: 0.015 * delta / (distance / 100 + 0.1)
    pub const AVOID_STRENGTH: f32 = 0.015;
    /// Distance divisor in the avoidance falloff
    pub const AVOID_DISTANCE_SCALE: f32 = 100.0;
    /// Offset keeping the avoidance falloff finite at zero distance
    pub const AVOID_DISTANCE_OFFSET: f32 = 0.1;
    /// Pull towards the followed particle, per frame unit
    pub const FOLLOW_STRENGTH: f32 = 0.01;
    /// Within this distance follow mode damps velocity to avoid overshoot
    pub const FOLLOW_CLOSE_DISTANCE: f32 = 50.0;
    /// Damping multiplier applied inside FOLLOW_CLOSE_DISTANCE
    pub const FOLLOW_DAMPING: f32 = 0.98;
}

/// Debris field generation
pub mod debris {
    /// Particles generated at loop start
    pub const DEFAULT_COUNT: usize = 25;
    /// Inner radius of the spawn ring around the spacecraft
    pub const RING_MIN: f32 = 100.0;
    /// Outer radius of the spawn ring
    pub const RING_MAX: f32 = 600.0;
    /// Per-axis velocity is drawn from [-MAX_AXIS_SPEED, MAX_AXIS_SPEED)
    pub const MAX_AXIS_SPEED: f32 = 0.25;
    pub const SIZE_MIN: f32 = 1.0;
    pub const SIZE_MAX: f32 = 3.0;
}

/// Radar and proximity bands
pub mod radar {
    /// Radar range setting is multiplied by this to get a radius in scene units
    pub const RANGE_TO_UNITS: f32 = 10.0;
    pub const MIN_RANGE: f32 = 5.0;
    pub const MAX_RANGE: f32 = 30.0;
    pub const DEFAULT_RANGE: f32 = 15.0;
    /// Critical band: min(CRITICAL_CAP, radius * CRITICAL_FRACTION)
    pub const CRITICAL_FRACTION: f32 = 0.3;
    pub const CRITICAL_CAP: f32 = 50.0;
    /// Warning band: min(WARNING_CAP, radius * WARNING_FRACTION)
    pub const WARNING_FRACTION: f32 = 0.6;
    pub const WARNING_CAP: f32 = 100.0;
    /// Collision threshold: min(COLLISION_CAP, radius * COLLISION_FRACTION)
    pub const COLLISION_FRACTION: f32 = 0.1;
    pub const COLLISION_CAP: f32 = 15.0;
    /// Angular width of the radar sweep wedge (radians)
    pub const SWEEP_WIDTH: f32 = std::f32::consts::PI / 8.0;
}

/// Notification cooldowns (milliseconds)
pub mod alerts {
    pub const CRITICAL_COOLDOWN_MS: u64 = 5_000;
    pub const WARNING_COOLDOWN_MS: u64 = 8_000;
    pub const COLLISION_COOLDOWN_MS: u64 = 1_000;
}

/// Pan/zoom view transform
pub mod view {
    pub const MIN_ZOOM: f32 = 0.5;
    pub const MAX_ZOOM: f32 = 3.0;
    pub const DEFAULT_ZOOM: f32 = 1.0;
    /// Zoom change per wheel notch
    pub const ZOOM_STEP: f32 = 0.1;
    /// Spacing of background grid lines
    pub const GRID_SPACING: f32 = 50.0;
    /// Radii of the reference rings drawn around the scene origin
    pub const REFERENCE_RINGS: [f32; 4] = [5.0, 100.0, 200.0, 300.0];
}

/// Default viewport used to place the spacecraft at scene center
pub mod viewport {
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;
}
