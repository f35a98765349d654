//! Drawing seam between the game and whatever shows it.
//!
//! [`render`] walks the state and issues draw calls; a [`Canvas`] decides
//! what each [`Sprite`] looks like. No game logic happens here.

use crate::compute::effect_frame;
use crate::entities::{Direction, GameState, GameStatus, Pose};
use crate::geometry::Rect;

/// Every image the game can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player(Pose),
    Projectile(Direction),
    Obstacle,
    /// One of the two alternating explosion images.
    Effect(u8),
}

pub trait Canvas {
    /// Start a new frame.
    fn clear(&mut self) -> std::io::Result<()>;
    fn draw(&mut self, sprite: Sprite, at: Rect) -> std::io::Result<()>;
    /// Text centred on `center`, in playfield coordinates.
    fn draw_text(&mut self, text: &str, center: (i32, i32)) -> std::io::Result<()>;
    fn present(&mut self) -> std::io::Result<()>;
}

/// Where the score is shown: near the lower-left corner.
pub fn score_anchor(state: &GameState) -> (i32, i32) {
    (100, state.field.height - 50)
}

/// Render one complete frame.
pub fn render<C: Canvas>(canvas: &mut C, state: &GameState) -> std::io::Result<()> {
    canvas.clear()?;

    canvas.draw(Sprite::Player(state.player.pose), state.player.rect)?;

    for projectile in state.projectiles.iter().filter(|p| !p.stalled) {
        canvas.draw(Sprite::Projectile(projectile.direction), projectile.rect)?;
    }
    for obstacle in &state.obstacles {
        canvas.draw(Sprite::Obstacle, obstacle.rect)?;
    }
    for effect in &state.effects {
        if let Some(frame) = effect_frame(effect) {
            canvas.draw(Sprite::Effect(frame), effect.rect)?;
        }
    }

    canvas.draw_text(&format!("Score: {}", state.score), score_anchor(state))?;

    if state.status == GameStatus::GameOver {
        let (w, h) = (state.field.width, state.field.height);
        canvas.draw_text("GAME OVER", (w / 2, h / 2))?;
    }

    canvas.present()
}
