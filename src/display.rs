//! Terminal canvas — all terminal I/O lives here.
//!
//! The playfield is scaled onto the character cells inside a border:
//!
//! ```text
//! row 0        title
//! row 1        ┌──────┐
//! rows 2..h-2  │ play │
//! row h-2      └──────┘
//! row h-1      controls hint
//! ```

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use bomb_blaster::entities::{Direction, Pose};
use bomb_blaster::geometry::{Playfield, Rect};
use bomb_blaster::render::{Canvas, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TITLE: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_PLAYER_CHEER: Color = Color::Green;
const C_PLAYER_DEFEATED: Color = Color::Red;
const C_BEAM: Color = Color::Cyan;
const C_BOMB: Color = Color::Red;
const C_EXPLOSION: Color = Color::Yellow;
const C_TEXT: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

const TITLE: &str = "BOMB BLASTER";
const HINT: &str = "Arrows / W A S D : Move   SPACE : Fire   Q : Quit";

// ── Glyph tables ──────────────────────────────────────────────────────────────

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::East => "→",
        Direction::NorthEast => "↗",
        Direction::North => "↑",
        Direction::NorthWest => "↖",
        Direction::West => "←",
        Direction::SouthWest => "↙",
        Direction::South => "↓",
        Direction::SouthEast => "↘",
    }
}

fn beam(direction: Direction) -> &'static str {
    match direction {
        Direction::East | Direction::West => "━━",
        Direction::North | Direction::South => "┃",
        Direction::NorthEast | Direction::SouthWest => "╱",
        Direction::NorthWest | Direction::SouthEast => "╲",
    }
}

fn glyph(sprite: Sprite) -> (String, Color) {
    match sprite {
        Sprite::Player(Pose::Facing(d)) => (format!("({})", arrow(d)), C_PLAYER),
        Sprite::Player(Pose::Cheering) => ("\\o/".to_string(), C_PLAYER_CHEER),
        Sprite::Player(Pose::Defeated) => ("x_x".to_string(), C_PLAYER_DEFEATED),
        Sprite::Projectile(d) => (beam(d).to_string(), C_BEAM),
        Sprite::Obstacle => ("●".to_string(), C_BOMB),
        Sprite::Effect(0) => ("✶".to_string(), C_EXPLOSION),
        Sprite::Effect(_) => ("✸".to_string(), C_EXPLOSION),
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

pub struct TerminalCanvas<W: Write> {
    out: W,
    width: u16,
    height: u16,
    field: Playfield,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, (width, height): (u16, u16), field: Playfield) -> Self {
        TerminalCanvas {
            out,
            width,
            height,
            field,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Map a playfield point to a cell inside the border, or `None` when it
    /// lies outside the playfield.
    fn to_cell(&self, (x, y): (i32, i32)) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.field.width || y >= self.field.height {
            return None;
        }
        let inner_w = self.width.saturating_sub(2) as i64;
        let inner_h = self.height.saturating_sub(4) as i64;
        let col = 1 + x as i64 * inner_w / self.field.width as i64;
        let row = 2 + y as i64 * inner_h / self.field.height as i64;
        Some((col as u16, row as u16))
    }

    /// Print `text` centred on the cell for `center`.
    fn put(&mut self, text: &str, color: Color, center: (i32, i32)) -> std::io::Result<()> {
        let Some((col, row)) = self.to_cell(center) else {
            return Ok(());
        };
        let half = text.chars().count() as u16 / 2;
        let col = col.saturating_sub(half).max(1);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.width as usize;
        let h = self.height;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        // Row 1 — top bar
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        // Row h-2 — bottom bar
        self.out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        // Side walls
        for row in 2..h.saturating_sub(2) {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }

        Ok(())
    }

    fn draw_chrome(&mut self) -> std::io::Result<()> {
        let tx = (self.width / 2).saturating_sub(TITLE.len() as u16 / 2);
        self.out.queue(cursor::MoveTo(tx, 0))?;
        self.out.queue(style::SetForegroundColor(C_TITLE))?;
        self.out.queue(Print(TITLE))?;

        self.out
            .queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(HINT))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_chrome()
    }

    fn draw(&mut self, sprite: Sprite, at: Rect) -> std::io::Result<()> {
        let (text, color) = glyph(sprite);
        self.put(&text, color, at.center())
    }

    fn draw_text(&mut self, text: &str, center: (i32, i32)) -> std::io::Result<()> {
        self.put(text, C_TEXT, center)
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()
    }
}
