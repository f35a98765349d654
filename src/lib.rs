//! Bomb Blaster — dodge the bouncing bombs, shoot them down.
//!
//! - `geometry`: rectangles, playfield bounds, AABB collision
//! - `entities`: pure data for every game object
//! - `compute`: per-entity update rules and the per-tick step
//! - `render`: the drawing seam between the game and a display
//! - `config`: tunable game settings

pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod render;
