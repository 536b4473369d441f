//! Score and health shown by the host's HUD
//!
//! The simulation tick never touches these. The host advances the score clock
//! on its own timer, and nothing in the core currently applies damage.

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_INTERVAL, START_HEALTH};

/// Numbers displayed by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    /// Health percentage (0-100)
    pub health: u8,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            health: START_HEALTH,
        }
    }
}

/// Survival score timer: one point per elapsed interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreClock {
    interval: f32,
    elapsed: f32,
}

impl Default for ScoreClock {
    fn default() -> Self {
        Self::new(SCORE_INTERVAL)
    }
}

impl ScoreClock {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds, awarding points to `hud`. Returns points awarded.
    pub fn advance(&mut self, hud: &mut Hud, dt: f32) -> u64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        // f32 -> u64 casts saturate
        let awarded = (self.elapsed / self.interval).floor() as u64;
        self.elapsed %= self.interval;
        hud.score = hud.score.saturating_add(awarded);
        awarded
    }
}
