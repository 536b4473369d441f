//! Data-driven simulation balance
//!
//! Every physics and spawn constant the simulation reads lives here so hosts
//! can override them from JSON. Missing fields fall back to [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected tuning file
#[derive(Debug)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A value is outside its allowed range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "failed to parse tuning: {}", err),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Player width/height (collision radius is half of this)
    pub player_size: f32,
    /// Momentum added per second at full input
    pub thruster_force: f32,
    /// Per-tick momentum multiplier, in (0, 1)
    pub friction: f32,
    /// Fraction of momentum kept after a wall bounce, in (0, 1)
    pub restitution: f32,

    // === Collisions ===
    pub bounce_force: f32,
    /// Extra gap left between player and obstacle after separation
    pub separation_epsilon: f32,
    pub obstacle_nudge: f32,

    // === Spawning ===
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    pub obstacle_size_min: f32,
    pub obstacle_size_max: f32,
    pub inward_speed_min: f32,
    pub inward_speed_max: f32,
    pub lateral_speed: f32,
    pub reap_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            thruster_force: THRUSTER_FORCE,
            friction: FRICTION,
            restitution: RESTITUTION,

            bounce_force: BOUNCE_FORCE,
            separation_epsilon: SEPARATION_EPSILON,
            obstacle_nudge: OBSTACLE_NUDGE,

            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            obstacle_size_min: OBSTACLE_SIZE_MIN,
            obstacle_size_max: OBSTACLE_SIZE_MAX,
            inward_speed_min: OBSTACLE_INWARD_SPEED_MIN,
            inward_speed_max: OBSTACLE_INWARD_SPEED_MAX,
            lateral_speed: OBSTACLE_LATERAL_SPEED,
            reap_margin: REAP_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (partial documents allowed)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Player collision radius
    #[inline]
    pub fn player_radius(&self) -> f32 {
        self.player_size / 2.0
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        };

        let all_finite = [
            self.player_size,
            self.thruster_force,
            self.friction,
            self.restitution,
            self.bounce_force,
            self.separation_epsilon,
            self.obstacle_nudge,
            self.spawn_interval_min,
            self.spawn_interval_max,
            self.obstacle_size_min,
            self.obstacle_size_max,
            self.inward_speed_min,
            self.inward_speed_max,
            self.lateral_speed,
            self.reap_margin,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return invalid("*", "values must be finite");
        }

        // Friction below 1 is what keeps drift from growing without bound
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return invalid("friction", "must be in (0, 1)");
        }
        if !(self.restitution > 0.0 && self.restitution < 1.0) {
            return invalid("restitution", "must be in (0, 1)");
        }
        if self.player_size <= 0.0 {
            return invalid("player_size", "must be positive");
        }
        if self.separation_epsilon < 0.0 {
            return invalid("separation_epsilon", "must not be negative");
        }
        if !(self.spawn_interval_min > 0.0 && self.spawn_interval_min < self.spawn_interval_max) {
            return invalid("spawn_interval_min", "must be positive and below spawn_interval_max");
        }
        if !(self.obstacle_size_min > 0.0 && self.obstacle_size_min < self.obstacle_size_max) {
            return invalid("obstacle_size_min", "must be positive and below obstacle_size_max");
        }
        if !(self.inward_speed_min > 0.0 && self.inward_speed_min < self.inward_speed_max) {
            return invalid("inward_speed_min", "must be positive and below inward_speed_max");
        }
        // Zero means no sideways drift
        if self.lateral_speed < 0.0 {
            return invalid("lateral_speed", "must not be negative");
        }
        // Obstacles spawn `size` outside an edge; a smaller margin would reap them at birth
        if self.reap_margin <= self.obstacle_size_max {
            return invalid("reap_margin", "must exceed obstacle_size_max");
        }
        Ok(())
    }
}
