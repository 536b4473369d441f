//! Player movement integration
//!
//! Thrust accumulates into momentum, friction bleeds it off every tick, and
//! the arena walls clamp position and bounce momentum back with energy loss.

use super::state::{Arena, Player};
use crate::tuning::Tuning;

/// Advance the player one tick. Returns true if it bounced off a wall.
pub fn integrate_player(player: &mut Player, tuning: &Tuning, arena: Arena, dt: f32) -> bool {
    // Zero input adds nothing; existing momentum keeps drifting
    player.momentum += player.input * tuning.thruster_force * dt;
    // Applied regardless of input so drift always dies out
    player.momentum *= tuning.friction;

    player.pos += player.momentum * dt;

    contain_player(player, arena, tuning.restitution)
}

/// Clamp the player inside `[half_size, bound - half_size]` on both axes,
/// bouncing momentum on any axis where it was heading into a wall.
///
/// Returns true if the player was bounced.
pub fn contain_player(player: &mut Player, arena: Arena, restitution: f32) -> bool {
    let half = player.radius();
    let bounced_x = contain_axis(&mut player.pos.x, &mut player.momentum.x, half, arena.width, restitution);
    let bounced_y = contain_axis(&mut player.pos.y, &mut player.momentum.y, half, arena.height, restitution);
    bounced_x || bounced_y
}

fn contain_axis(pos: &mut f32, momentum: &mut f32, half: f32, bound: f32, restitution: f32) -> bool {
    let (lo, hi) = (half, bound - half);

    // Arena narrower than the player: pin to the middle
    if lo > hi {
        *pos = bound / 2.0;
        *momentum = 0.0;
        return false;
    }

    // Non-finite positions (e.g. from a huge dt) snap back inside
    if !pos.is_finite() {
        *pos = (lo + hi) / 2.0;
        *momentum = 0.0;
        return false;
    }

    if *pos <= lo {
        *pos = lo;
        // Only momentum heading into the wall is reflected (with energy loss)
        if *momentum < 0.0 {
            *momentum = -*momentum * restitution;
            return true;
        }
    } else if *pos >= hi {
        *pos = hi;
        if *momentum > 0.0 {
            *momentum = -*momentum * restitution;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), 48.0)
    }

    #[test]
    fn test_thrust_into_right_wall() {
        let tuning = Tuning::default();
        let arena = Arena::new(400.0, 800.0);
        let mut player = player_at(200.0, 400.0);
        player.input = Vec2::new(1.0, 0.0);

        let bounced = integrate_player(&mut player, &tuning, arena, 1.0);

        // momentum 300 * 0.98 = 294 carries x to 494, clamped to 400 - 24
        assert!(bounced);
        assert_eq!(player.pos, Vec2::new(376.0, 400.0));
        assert!((player.momentum.x - -205.8).abs() < 1e-3);
        assert_eq!(player.momentum.y, 0.0);
    }

    #[test]
    fn test_zero_input_keeps_drifting() {
        let tuning = Tuning::default();
        let arena = Arena::new(10_000.0, 10_000.0);
        let mut player = player_at(5_000.0, 5_000.0);
        player.momentum = Vec2::new(100.0, -50.0);

        integrate_player(&mut player, &tuning, arena, 0.1);

        assert!((player.momentum.x - 98.0).abs() < 1e-4);
        assert!((player.momentum.y - -49.0).abs() < 1e-4);
        assert!((player.pos.x - 5_009.8).abs() < 1e-2);
        assert!((player.pos.y - 4_995.1).abs() < 1e-2);
    }

    #[test]
    fn test_left_wall_bounce_points_inward() {
        let tuning = Tuning::default();
        let arena = Arena::new(400.0, 800.0);
        let mut player = player_at(30.0, 400.0);
        player.momentum = Vec2::new(-500.0, 0.0);

        assert!(integrate_player(&mut player, &tuning, arena, 0.1));
        assert_eq!(player.pos.x, 24.0);
        let expected = 500.0 * 0.98 * 0.7;
        assert!((player.momentum.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_resting_at_wall_is_not_a_bounce() {
        let arena = Arena::new(400.0, 800.0);
        let mut player = player_at(24.0, 400.0);
        assert!(!contain_player(&mut player, arena, 0.7));
        assert_eq!(player.pos, Vec2::new(24.0, 400.0));
    }

    #[test]
    fn test_inward_momentum_at_wall_is_untouched() {
        let arena = Arena::new(400.0, 800.0);
        let mut player = player_at(376.0, 400.0);
        player.momentum = Vec2::new(-205.8, 0.0);
        assert!(!contain_player(&mut player, arena, 0.7));
        assert_eq!(player.momentum.x, -205.8);

        // Shrunken bounds clamp without flipping an inward drift
        let mut player = player_at(390.0, 400.0);
        player.momentum = Vec2::new(-50.0, 0.0);
        assert!(!contain_player(&mut player, arena, 0.7));
        assert_eq!(player.pos.x, 376.0);
        assert_eq!(player.momentum.x, -50.0);
    }

    #[test]
    fn test_tiny_arena_centers_player() {
        let arena = Arena::new(30.0, 800.0);
        let mut player = player_at(5.0, 400.0);
        player.momentum = Vec2::new(40.0, 0.0);
        contain_player(&mut player, arena, 0.7);
        assert_eq!(player.pos.x, 15.0);
        assert_eq!(player.momentum.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_inside(
            start in (24.0f32..376.0, 24.0f32..776.0),
            momentum in (-2000.0f32..2000.0, -2000.0f32..2000.0),
            inputs in prop::collection::vec((-1.0f32..=1.0, -1.0f32..=1.0, 0.0f32..0.5), 1..50),
        ) {
            let tuning = Tuning::default();
            let arena = Arena::new(400.0, 800.0);
            let mut player = player_at(start.0, start.1);
            player.momentum = Vec2::new(momentum.0, momentum.1);

            for (x, y, dt) in inputs {
                player.input = Vec2::new(x, y);
                integrate_player(&mut player, &tuning, arena, dt);
                prop_assert!(player.pos.x >= 24.0 && player.pos.x <= 376.0);
                prop_assert!(player.pos.y >= 24.0 && player.pos.y <= 776.0);
            }
        }

        #[test]
        fn prop_friction_decay(
            momentum in (-500.0f32..500.0, -500.0f32..500.0),
            dt in 0.001f32..0.033,
            ticks in 1usize..60,
        ) {
            let tuning = Tuning::default();
            let arena = Arena::new(1.0e6, 1.0e6);
            let mut player = player_at(5.0e5, 5.0e5);
            player.momentum = Vec2::new(momentum.0, momentum.1);
            let start = player.momentum.length();

            let mut previous = start;
            for _ in 0..ticks {
                integrate_player(&mut player, &tuning, arena, dt);
                let current = player.momentum.length();
                prop_assert!(current <= previous + 1e-3);
                previous = current;
            }

            let expected = start * tuning.friction.powi(ticks as i32);
            prop_assert!((player.momentum.length() - expected).abs() <= 1e-3 * start.max(1.0));
        }

        #[test]
        fn prop_bounce_restitution(
            speed in 100.0f32..3000.0,
            y in 100.0f32..700.0,
        ) {
            let tuning = Tuning::default();
            let arena = Arena::new(400.0, 800.0);
            let mut player = player_at(370.0, y);
            player.momentum = Vec2::new(speed, 0.0);

            integrate_player(&mut player, &tuning, arena, 0.1);

            let pre_bounce = speed * tuning.friction;
            prop_assert!(player.momentum.x < 0.0);
            prop_assert!((player.momentum.x.abs() - pre_bounce * tuning.restitution).abs() < 1e-2);
        }
    }
}
