//! All game entity types — pure data, no game rules.

use crate::geometry::{Playfield, Rect};

/// Pixels moved per axis per held key, and the speed of a beam.
pub const STEP: i32 = 5;

pub const PLAYER_SIZE: (i32, i32) = (50, 40);
pub const PLAYER_START: (i32, i32) = (300, 200);
/// Nominal beam size when fired east; other directions rotate it.
pub const BEAM_SIZE: (i32, i32) = (60, 20);
pub const BOMB_RADIUS: i32 = 10;
pub const BOMB_VELOCITY: (i32, i32) = (5, 5);
pub const EFFECT_SIZE: (i32, i32) = (60, 60);
/// Ticks an explosion stays on screen.
pub const EFFECT_LIFETIME: u32 = 20;

// ── Facing ────────────────────────────────────────────────────────────────────

/// One of the eight compass directions the player can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// Counter-clockwise from east.
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Displacement of one step in this direction (screen coordinates).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (STEP, 0),
            Direction::NorthEast => (STEP, -STEP),
            Direction::North => (0, -STEP),
            Direction::NorthWest => (-STEP, -STEP),
            Direction::West => (-STEP, 0),
            Direction::SouthWest => (-STEP, STEP),
            Direction::South => (0, STEP),
            Direction::SouthEast => (STEP, STEP),
        }
    }

    /// Inverse of [`Direction::delta`]. Only the sign of each component
    /// matters; `(0, 0)` has no direction.
    pub fn from_delta((dx, dy): (i32, i32)) -> Option<Direction> {
        let d = match (dx.signum(), dy.signum()) {
            (1, 0) => Direction::East,
            (1, -1) => Direction::NorthEast,
            (0, -1) => Direction::North,
            (-1, -1) => Direction::NorthWest,
            (-1, 0) => Direction::West,
            (-1, 1) => Direction::SouthWest,
            (0, 1) => Direction::South,
            (1, 1) => Direction::SouthEast,
            _ => return None,
        };
        Some(d)
    }

    pub fn angle_degrees(self) -> f64 {
        match self {
            Direction::East => 0.0,
            Direction::NorthEast => 45.0,
            Direction::North => 90.0,
            Direction::NorthWest => 135.0,
            Direction::West => 180.0,
            Direction::SouthWest => 225.0,
            Direction::South => 270.0,
            Direction::SouthEast => 315.0,
        }
    }
}

/// What the player sprite currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Facing(Direction),
    /// Just shot down a bomb. Lasts until the player moves again.
    Cheering,
    /// Hit by a bomb.
    Defeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Direction of the last non-zero move; beams fly this way.
    pub facing: Direction,
    pub pose: Pose,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    pub velocity: (i32, i32),
    pub direction: Direction,
    /// Set when the last advance found the beam outside the playfield and
    /// skipped the move. Stalled beams are not drawn.
    pub stalled: bool,
}

// ── Obstacles & effects ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub velocity: (i32, i32),
}

/// A short explosion left behind by a destroyed bomb.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub rect: Rect,
    /// Remaining ticks; 0 means finished.
    pub countdown: u32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Direction keys held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Sum of the per-key steps. Opposite keys cancel out.
    pub fn net_delta(&self) -> (i32, i32) {
        let keys = [
            (self.up, (0, -STEP)),
            (self.down, (0, STEP)),
            (self.left, (-STEP, 0)),
            (self.right, (STEP, 0)),
        ];
        keys.iter()
            .filter(|(held, _)| *held)
            .fold((0, 0), |(x, y), (_, (dx, dy))| (x + dx, y + dy))
    }
}

/// Everything the loop collected from the player for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub keys: HeldKeys,
    /// Fire presses drained since the previous tick.
    pub shots: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole game. Cloneable so the update functions can return a fresh
/// copy without touching the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub effects: Vec<Effect>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub field: Playfield,
}
