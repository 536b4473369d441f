//! Circle-circle collision detection and response
//!
//! The player is tested against every obstacle after movement. Overlaps push
//! the player out along the contact normal and kick both bodies apart. The
//! exchange is deliberately lopsided and does not conserve momentum.

use glam::Vec2;

use super::state::{EntityId, Obstacle, Player};
use crate::tuning::Tuning;

/// Result of a circle overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Raw vector from the obstacle center to the player center
    pub offset: Vec2,
    /// Unit normal from obstacle to player (None if the centers coincide)
    pub normal: Option<Vec2>,
    /// Sum of radii minus center distance
    pub penetration: f32,
}

/// Check two circles for overlap (touching does not count)
pub fn circle_contact(player_pos: Vec2, player_radius: f32, obstacle_pos: Vec2, obstacle_radius: f32) -> Option<Contact> {
    let offset = player_pos - obstacle_pos;
    let reach = player_radius + obstacle_radius;
    let dist_sq = offset.length_squared();

    if dist_sq >= reach * reach {
        return None;
    }

    Some(Contact {
        offset,
        normal: offset.try_normalize(),
        penetration: reach - dist_sq.sqrt(),
    })
}

/// Resolve one overlapping pair
///
/// The player gets an impulse of `bounce_force` along the normal and is moved
/// to `reach + separation_epsilon` from the obstacle. The obstacle's velocity
/// is nudged by the raw offset (not the normal), scaled by `obstacle_nudge`.
pub fn resolve_contact(player: &mut Player, obstacle: &mut Obstacle, contact: &Contact, tuning: &Tuning) {
    if let Some(normal) = contact.normal {
        player.momentum += normal * tuning.bounce_force;
        let separation = player.radius() + obstacle.radius() + tuning.separation_epsilon;
        player.pos = obstacle.pos + normal * separation;
    }
    obstacle.vel += contact.offset * tuning.obstacle_nudge;
}

/// Test the player against all obstacles, in iteration order
///
/// Each overlap is resolved against the player's position as left by the
/// previous one. Returns the ids of obstacles that were hit.
pub fn resolve_player_collisions<'a>(
    player: &mut Player,
    obstacles: impl IntoIterator<Item = &'a mut Obstacle>,
    tuning: &Tuning,
) -> Vec<EntityId> {
    let mut hits = Vec::new();

    for obstacle in obstacles {
        let Some(contact) = circle_contact(player.pos, player.radius(), obstacle.pos, obstacle.radius()) else {
            continue;
        };
        if contact.normal.is_none() {
            log::trace!("Coincident centers with {}; skipping separation", obstacle.id);
        }
        resolve_contact(player, obstacle, &contact, tuning);
        log::trace!(
            "Collision with {}: penetration {:.2}, player momentum {:?}",
            obstacle.id,
            contact.penetration,
            player.momentum
        );
        hits.push(obstacle.id);
    }

    hits
}
