//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod movement;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Contact, circle_contact, resolve_player_collisions};
pub use movement::{contain_player, integrate_player};
pub use spawner::{Edge, move_and_reap, spawn_obstacle, update_spawn_timer};
pub use state::{
    Arena, EntityId, EntityKind, EntityView, Obstacle, ObstacleKind, ObstacleStyle, Player,
    SimEvent, SimState, Snapshot,
};
pub use tick::{TickInput, tick};
