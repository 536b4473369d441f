//! Simulation state and entity types
//!
//! `SimState` is the entity store plus everything else a tick reads or writes.
//! The host owns it and passes it by reference into [`super::tick`].

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Stable entity identifier
///
/// The player is always [`EntityId::PLAYER`]; obstacles get ids from a
/// monotonic counter and are never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    pub const PLAYER: EntityId = EntityId(0);

    #[inline]
    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            write!(f, "player")
        } else {
            write!(f, "obstacle_{}", self.0)
        }
    }
}

/// Obstacle categories. Styling only; physics treats them identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Asteroid,
    Debris,
    Crystal,
}

/// Visual hints for the external renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleStyle {
    pub fill: &'static str,
    pub border: &'static str,
    pub glow: &'static str,
    /// Corner radius as a fraction of size (0.5 = circle)
    pub corner_ratio: f32,
}

const ASTEROID_STYLE: ObstacleStyle = ObstacleStyle {
    fill: "#6b7280",
    border: "#9ca3af",
    glow: "#d1d5db",
    corner_ratio: 0.5,
};

const DEBRIS_STYLE: ObstacleStyle = ObstacleStyle {
    fill: "#ea580c",
    border: "#fb923c",
    glow: "#fdba74",
    corner_ratio: 0.5,
};

const CRYSTAL_STYLE: ObstacleStyle = ObstacleStyle {
    fill: "#9333ea",
    border: "#c084fc",
    glow: "#d8b4fe",
    corner_ratio: 0.15,
};

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Asteroid,
        ObstacleKind::Debris,
        ObstacleKind::Crystal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Asteroid => "asteroid",
            ObstacleKind::Debris => "debris",
            ObstacleKind::Crystal => "crystal",
        }
    }

    pub fn style(&self) -> &'static ObstacleStyle {
        match self {
            ObstacleKind::Asteroid => &ASTEROID_STYLE,
            ObstacleKind::Debris => &DEBRIS_STYLE,
            ObstacleKind::Crystal => &CRYSTAL_STYLE,
        }
    }
}

/// Player or obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "category", rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Obstacle(ObstacleKind),
}

/// Arena bounds in arena units, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    /// Used when the host never supplied usable bounds
    pub const FALLBACK: Arena = Arena {
        width: 400.0,
        height: 800.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Finite and strictly positive on both axes
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// True if `pos` lies more than `margin` outside the arena on either axis
    pub fn is_beyond(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// The single player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Latest thrust direction, each axis in [-1, 1]
    pub input: Vec2,
    /// Accumulated velocity (units/s), decays by friction every tick
    pub momentum: Vec2,
    pub size: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            input: Vec2::ZERO,
            momentum: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// A drifting obstacle (circular for collision purposes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    /// Constant straight-line velocity (units/s), changed only by collisions
    pub vel: Vec2,
    pub size: f32,
}

impl Obstacle {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Cosmetic spin for renderers, derived from position (degrees)
    #[inline]
    pub fn rotation_deg(&self) -> f32 {
        (self.pos.x + self.pos.y) * 0.5
    }
}

/// Things that happened during the last tick (for sound/HUD collaborators)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Spawned { id: EntityId, kind: ObstacleKind },
    Reaped { id: EntityId },
    Collided { id: EntityId },
    WallBounce,
}

/// Read-only view of one entity for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: String,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ObstacleStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<f32>,
}

/// Entity store contents at a point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub arena: Arena,
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    /// Obstacles keyed by id; iteration order is id order
    pub obstacles: BTreeMap<EntityId, Obstacle>,
    /// Seconds since the last obstacle spawn
    pub spawn_timer: f32,
    /// Spawn threshold for the current cycle
    pub(crate) next_spawn_at: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) events: Vec<SimEvent>,
    /// Last bounds that passed validation
    pub(crate) arena: Arena,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// Start a run: player centered with zero momentum, no obstacles
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(err) => {
                log::warn!("{}; using default tuning", err);
                Tuning::default()
            }
        };
        let arena = if arena.is_valid() {
            arena
        } else {
            log::warn!("Invalid initial arena {:?}; using fallback", arena);
            Arena::FALLBACK
        };

        let mut rng = Pcg32::seed_from_u64(seed);
        let next_spawn_at = super::spawner::draw_spawn_interval(&mut rng, &tuning);

        log::info!(
            "Simulation started: seed={} arena={}x{}",
            seed,
            arena.width,
            arena.height
        );

        Self {
            seed,
            player: Player::new(arena.center(), tuning.player_size),
            obstacles: BTreeMap::new(),
            spawn_timer: 0.0,
            next_spawn_at,
            time_ticks: 0,
            events: Vec::new(),
            arena,
            tuning,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an obstacle with a freshly allocated id
    pub fn insert_obstacle(&mut self, kind: ObstacleKind, pos: Vec2, vel: Vec2, size: f32) -> EntityId {
        let id = self.next_entity_id();
        self.obstacles.insert(
            id,
            Obstacle {
                id,
                kind,
                pos,
                vel,
                size,
            },
        );
        id
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Bounds used by the most recent tick
    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Accept new bounds if usable, otherwise keep the last known ones
    pub(crate) fn refresh_arena(&mut self, arena: Arena) -> Arena {
        if arena.is_valid() {
            self.arena = arena;
        } else {
            log::warn!(
                "Ignoring invalid arena {:?}; keeping {}x{}",
                arena,
                self.arena.width,
                self.arena.height
            );
        }
        self.arena
    }

    /// Total entities in the store (player included)
    pub fn entity_count(&self) -> usize {
        1 + self.obstacles.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        id.is_player() || self.obstacles.contains_key(&id)
    }

    /// Player first, then obstacles in id order
    pub fn entities(&self) -> impl Iterator<Item = EntityView> + '_ {
        let player = EntityView {
            id: EntityId::PLAYER.to_string(),
            kind: EntityKind::Player,
            pos: self.player.pos,
            size: self.player.size,
            style: None,
            rotation_deg: None,
        };
        std::iter::once(player).chain(self.obstacles.values().map(|o| EntityView {
            id: o.id.to_string(),
            kind: EntityKind::Obstacle(o.kind),
            pos: o.pos,
            size: o.size,
            style: Some(*o.kind.style()),
            rotation_deg: Some(o.rotation_deg()),
        }))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            arena: self.arena,
            entities: self.entities().collect(),
        }
    }
}
