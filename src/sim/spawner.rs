//! Obstacle spawning and reaping
//!
//! Obstacles enter from a random arena edge on a randomized cadence, drift in
//! straight lines, and are removed once they wander past the reap margin.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Arena, ObstacleKind, SimEvent, SimState};
use crate::tuning::Tuning;

/// Arena edge an obstacle enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Next spawn threshold, uniform in [min, max)
pub fn draw_spawn_interval(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    rng.random_range(tuning.spawn_interval_min..tuning.spawn_interval_max)
}

/// Starting position and velocity for an obstacle entering from `edge`
///
/// The obstacle sits `size` outside the edge, moving inward with a random
/// lateral drift. It never starts out moving away from the arena.
pub fn entry_for_edge(rng: &mut Pcg32, tuning: &Tuning, arena: Arena, edge: Edge, size: f32) -> (Vec2, Vec2) {
    let inward = rng.random_range(tuning.inward_speed_min..tuning.inward_speed_max);
    let lateral = if tuning.lateral_speed > 0.0 {
        rng.random_range(-tuning.lateral_speed..tuning.lateral_speed)
    } else {
        0.0
    };

    match edge {
        Edge::Top => (
            Vec2::new(rng.random_range(0.0..arena.width), -size),
            Vec2::new(lateral, inward),
        ),
        Edge::Right => (
            Vec2::new(arena.width + size, rng.random_range(0.0..arena.height)),
            Vec2::new(-inward, lateral),
        ),
        Edge::Bottom => (
            Vec2::new(rng.random_range(0.0..arena.width), arena.height + size),
            Vec2::new(lateral, -inward),
        ),
        Edge::Left => (
            Vec2::new(-size, rng.random_range(0.0..arena.height)),
            Vec2::new(inward, lateral),
        ),
    }
}

/// Advance the spawn timer and spawn one obstacle when it comes due
pub fn update_spawn_timer(state: &mut SimState, arena: Arena, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer < state.next_spawn_at {
        return;
    }

    // Overshoot is discarded, not carried into the next cycle
    state.spawn_timer = 0.0;
    spawn_obstacle(state, arena);
    state.next_spawn_at = draw_spawn_interval(&mut state.rng, &state.tuning);
}

/// Spawn a single obstacle at a random edge
pub fn spawn_obstacle(state: &mut SimState, arena: Arena) {
    let rng = &mut state.rng;
    let tuning = &state.tuning;

    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let size = rng.random_range(tuning.obstacle_size_min..tuning.obstacle_size_max);
    let (pos, vel) = entry_for_edge(rng, tuning, arena, edge, size);

    let id = state.insert_obstacle(kind, pos, vel, size);
    state.events.push(SimEvent::Spawned { id, kind });
    log::debug!("Spawned {} {} from {:?} at {:?} vel {:?}", kind.as_str(), id, edge, pos, vel);
}

/// Move every obstacle in a straight line and drop those past the margin
pub fn move_and_reap(state: &mut SimState, arena: Arena, dt: f32) {
    let margin = state.tuning.reap_margin;
    let events = &mut state.events;

    state.obstacles.retain(|id, obstacle| {
        obstacle.pos += obstacle.vel * dt;
        let keep = !arena.is_beyond(obstacle.pos, margin);
        if !keep {
            log::debug!("Reaped {} at {:?}", id, obstacle.pos);
            events.push(SimEvent::Reaped { id: *id });
        }
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn arena() -> Arena {
        Arena::new(400.0, 800.0)
    }

    #[test]
    fn test_spawn_intervals_in_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1000 {
            let interval = draw_spawn_interval(&mut rng, &tuning);
            assert!((2.0..4.0).contains(&interval));
        }
    }

    #[test]
    fn test_entries_start_outside_and_move_inward() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let arena = arena();

        for _ in 0..200 {
            for edge in Edge::ALL {
                let size = 45.0;
                let (pos, vel) = entry_for_edge(&mut rng, &tuning, arena, edge, size);
                match edge {
                    Edge::Top => {
                        assert_eq!(pos.y, -size);
                        assert!(vel.y >= 50.0 && vel.y < 100.0);
                        assert!((0.0..400.0).contains(&pos.x));
                    }
                    Edge::Right => {
                        assert_eq!(pos.x, 400.0 + size);
                        assert!(vel.x <= -50.0 && vel.x > -100.0);
                    }
                    Edge::Bottom => {
                        assert_eq!(pos.y, 800.0 + size);
                        assert!(vel.y <= -50.0 && vel.y > -100.0);
                    }
                    Edge::Left => {
                        assert_eq!(pos.x, -size);
                        assert!(vel.x >= 50.0 && vel.x < 100.0);
                        assert!((0.0..800.0).contains(&pos.y));
                    }
                }
                let lateral = match edge {
                    Edge::Top | Edge::Bottom => vel.x,
                    Edge::Left | Edge::Right => vel.y,
                };
                assert!((-50.0..50.0).contains(&lateral));
            }
        }
    }

    #[test]
    fn test_zero_lateral_speed_moves_straight_in() {
        let tuning = Tuning {
            lateral_speed: 0.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        for edge in Edge::ALL {
            let (_, vel) = entry_for_edge(&mut rng, &tuning, arena(), edge, 40.0);
            match edge {
                Edge::Top | Edge::Bottom => assert_eq!(vel.x, 0.0),
                Edge::Left | Edge::Right => assert_eq!(vel.y, 0.0),
            }
        }
    }

    #[test]
    fn test_edges_and_kinds_are_uniform() {
        let mut state = SimState::new(42, arena(), Tuning::default());
        let spawns = 6000;
        let mut edges = [0usize; 4];
        let mut kinds = [0usize; 3];

        for _ in 0..spawns {
            spawn_obstacle(&mut state, arena());
        }
        for obstacle in state.obstacles.values() {
            let (pos, size) = (obstacle.pos, obstacle.size);
            let edge = if pos.y == -size {
                Edge::Top
            } else if pos.x == 400.0 + size {
                Edge::Right
            } else if pos.y == 800.0 + size {
                Edge::Bottom
            } else {
                assert_eq!(pos.x, -size);
                Edge::Left
            };
            edges[Edge::ALL.iter().position(|e| *e == edge).unwrap()] += 1;
            kinds[ObstacleKind::ALL.iter().position(|k| *k == obstacle.kind).unwrap()] += 1;
        }

        for count in edges {
            assert!(count.abs_diff(spawns / 4) < 200, "edge counts {:?}", edges);
        }
        for count in kinds {
            assert!(count.abs_diff(spawns / 3) < 200, "kind counts {:?}", kinds);
        }
    }

    #[test]
    fn test_timer_resets_to_zero_on_spawn() {
        let mut state = SimState::new(5, arena(), Tuning::default());
        let threshold = state.next_spawn_at;

        update_spawn_timer(&mut state, arena(), threshold - 0.01);
        assert!(state.obstacles.is_empty());

        // Overshoot by a lot; the remainder must not carry over
        update_spawn_timer(&mut state, arena(), 1.5);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
        assert!(matches!(state.events()[0], SimEvent::Spawned { .. }));

        let obstacle = state.obstacles.values().next().unwrap();
        assert!(obstacle.size >= 30.0 && obstacle.size < 60.0);
        assert!(ObstacleKind::ALL.contains(&obstacle.kind));
    }

    #[test]
    fn test_obstacles_past_margin_are_reaped() {
        let mut state = SimState::new(5, arena(), Tuning::default());
        let leaving = state.insert_obstacle(
            ObstacleKind::Asteroid,
            Vec2::new(-95.0, 300.0),
            Vec2::new(-60.0, 0.0),
            40.0,
        );
        let staying = state.insert_obstacle(
            ObstacleKind::Debris,
            Vec2::new(200.0, -60.0),
            Vec2::new(0.0, 80.0),
            40.0,
        );

        move_and_reap(&mut state, arena(), 0.1);

        assert!(!state.contains(leaving));
        assert!(state.contains(staying));
        assert_eq!(state.obstacles[&staying].pos, Vec2::new(200.0, -52.0));
        assert_eq!(state.events(), &[SimEvent::Reaped { id: leaving }]);
    }

    #[test]
    fn test_fresh_spawn_survives_first_move() {
        let mut state = SimState::new(9, arena(), Tuning::default());
        for _ in 0..100 {
            spawn_obstacle(&mut state, arena());
        }
        move_and_reap(&mut state, arena(), 1.0 / 60.0);
        assert_eq!(state.obstacles.len(), 100);
    }
}
