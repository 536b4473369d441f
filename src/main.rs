//! Drift Arena headless runner
//!
//! Drives the simulation natively with a scripted joystick so the core can be
//! exercised without a host app. Usage: `drift-arena [seed] [seconds] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drift_arena::consts::FRAME_DT;
    use drift_arena::sim::{Arena, SimEvent, SimState, TickInput, tick};
    use drift_arena::{Hud, ScoreClock, Tuning};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|err| {
                log::warn!("{}: {}; using defaults", path, err);
                Tuning::default()
            }),
            Err(err) => {
                log::warn!("Could not read {}: {}; using defaults", path, err);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    log::info!("Drift Arena (native) starting...");

    let arena = Arena::new(400.0, 800.0);
    let mut state = SimState::new(seed, arena, tuning);
    let mut hud = Hud::default();
    let mut score_clock = ScoreClock::default();

    let ticks = (seconds / FRAME_DT).round() as u64;
    let (mut spawns, mut reaps, mut hits, mut bounces) = (0u32, 0u32, 0u32, 0u32);

    for i in 0..ticks {
        // Slow circle on the stick, released every few seconds
        let t = i as f32 * FRAME_DT;
        let input = if (t as u32) % 5 < 3 {
            TickInput::thrust((t * 0.8).cos(), (t * 0.8).sin())
        } else {
            TickInput::default()
        };

        tick(&mut state, &input, arena, FRAME_DT);
        score_clock.advance(&mut hud, FRAME_DT);

        for event in state.events() {
            match event {
                SimEvent::Spawned { .. } => spawns += 1,
                SimEvent::Reaped { .. } => reaps += 1,
                SimEvent::Collided { .. } => hits += 1,
                SimEvent::WallBounce => bounces += 1,
            }
        }
    }

    println!("Simulated {:.1}s ({} ticks, seed {})", seconds, ticks, seed);
    println!("  spawned {}, reaped {}, alive {}", spawns, reaps, state.obstacles.len());
    println!("  collisions {}, wall bounces {}", hits, bounces);
    println!("  score {}, health {}", hud.score, hud.health);
    match state.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Snapshot serialization failed: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // On the web the host page owns the frame loop and calls into the library
}
