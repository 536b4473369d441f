//! Drift Arena - real-time arena simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, entity store)
//! - `tuning`: Data-driven physics and spawn balance
//! - `hud`: Score/health model shown by the host's HUD
//!
//! Rendering, input widgets and the frame scheduler belong to the host.
//! The core owns simulation state only.

pub mod hud;
pub mod sim;
pub mod tuning;

pub use hud::{Hud, ScoreClock};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Simulation configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal frame timestep (60 Hz display refresh)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 48.0;
    /// Momentum gained per second at full stick deflection
    pub const THRUSTER_FORCE: f32 = 300.0;
    /// Per-tick momentum multiplier (must be < 1)
    pub const FRICTION: f32 = 0.98;
    /// Fraction of momentum kept after hitting an arena wall
    pub const RESTITUTION: f32 = 0.7;

    /// Collision response
    pub const BOUNCE_FORCE: f32 = 200.0;
    pub const SEPARATION_EPSILON: f32 = 5.0;
    /// Obstacle velocity nudge per unit of raw displacement
    pub const OBSTACLE_NUDGE: f32 = 0.5;

    /// Spawn cadence (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 2.0;
    pub const SPAWN_INTERVAL_MAX: f32 = 4.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE_MIN: f32 = 30.0;
    pub const OBSTACLE_SIZE_MAX: f32 = 60.0;
    pub const OBSTACLE_INWARD_SPEED_MIN: f32 = 50.0;
    pub const OBSTACLE_INWARD_SPEED_MAX: f32 = 100.0;
    /// Lateral drift is drawn from [-LATERAL, LATERAL)
    pub const OBSTACLE_LATERAL_SPEED: f32 = 50.0;
    /// Distance beyond the arena at which obstacles are reaped
    pub const REAP_MARGIN: f32 = 100.0;

    /// HUD defaults
    pub const START_HEALTH: u8 = 100;
    pub const SCORE_INTERVAL: f32 = 1.0;
}

/// Clamp each axis of a direction to [-1, 1], zeroing non-finite components
#[inline]
pub fn sanitize_direction(dir: Vec2) -> Vec2 {
    let axis = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(axis(dir.x), axis(dir.y))
}
