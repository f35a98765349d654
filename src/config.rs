//! Game settings.

use std::time::Duration;

use crate::geometry::Playfield;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub field: Playfield,
    /// Bombs placed at start.
    pub obstacle_count: usize,
    /// Ticks per second.
    pub frame_rate: u32,
    /// How long the defeat frame stays up before the program exits.
    pub game_over_hold: Duration,
    /// Fixed RNG seed for reproducible bomb placement.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field: Playfield::default(),
            obstacle_count: 5,
            frame_rate: 50,
            game_over_hold: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Length of one tick.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}
