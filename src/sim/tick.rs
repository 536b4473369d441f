//! Per-frame simulation tick
//!
//! The host's frame scheduler calls [`tick`] once per frame. Order within a
//! tick is fixed: spawn/reap, then player movement, then collisions, so
//! collisions always see already-moved positions.

use glam::Vec2;

use super::collision::resolve_player_collisions;
use super::movement::{contain_player, integrate_player};
use super::spawner::{move_and_reap, update_spawn_timer};
use super::state::{Arena, SimEvent, SimState};
use crate::sanitize_direction;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Joystick direction, each axis in [-1, 1]; None means no thrust
    pub direction: Option<Vec2>,
}

impl TickInput {
    pub fn thrust(x: f32, y: f32) -> Self {
        Self {
            direction: Some(Vec2::new(x, y)),
        }
    }
}

/// Advance the simulation by one frame
///
/// `arena` is read fresh every tick so rotations and resizes apply on the
/// next frame; unusable bounds fall back to the last known ones. A negative
/// or non-finite `dt` is treated as zero.
pub fn tick(state: &mut SimState, input: &TickInput, arena: Arena, dt: f32) {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    let arena = state.refresh_arena(arena);

    state.events.clear();
    state.time_ticks += 1;

    state.player.input = input.direction.map(sanitize_direction).unwrap_or(Vec2::ZERO);

    // Spawn/reap
    update_spawn_timer(state, arena, dt);
    move_and_reap(state, arena, dt);

    // Movement
    let mut bounced = integrate_player(&mut state.player, &state.tuning, arena, dt);

    // Collisions
    let hits = resolve_player_collisions(&mut state.player, state.obstacles.values_mut(), &state.tuning);
    if !hits.is_empty() {
        // Separation can push the player past a wall
        bounced |= contain_player(&mut state.player, arena, state.tuning.restitution);
    }

    state
        .events
        .extend(hits.into_iter().map(|id| SimEvent::Collided { id }));
    if bounced {
        state.events.push(SimEvent::WallBounce);
    }
}
