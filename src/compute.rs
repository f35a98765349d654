//! Pure game-logic functions.
//!
//! Every public function takes immutable references (and, where needed, an
//! RNG handle) and returns brand-new values. Side effects are limited to the
//! injected RNG and log records.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Direction, Effect, GameState, GameStatus, HeldKeys, Obstacle, Player, Pose, Projectile,
    TickInput, BEAM_SIZE, BOMB_RADIUS, BOMB_VELOCITY, EFFECT_LIFETIME, EFFECT_SIZE,
    PLAYER_SIZE, PLAYER_START, STEP,
};
use crate::geometry::{check_bound, fully_inside, intersects, Playfield, Rect};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: player at the start position, bombs scattered.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let obstacles = (0..config.obstacle_count)
        .map(|_| new_obstacle(config.field, rng))
        .collect();
    GameState {
        player: new_player(PLAYER_START),
        obstacles,
        projectiles: Vec::new(),
        effects: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        field: config.field,
    }
}

pub fn new_player(center: (i32, i32)) -> Player {
    Player {
        rect: Rect::centered(center, PLAYER_SIZE.0, PLAYER_SIZE.1),
        facing: Direction::East,
        pose: Pose::Facing(Direction::East),
    }
}

/// A bomb at a random spot, fully inside the playfield.
pub fn new_obstacle(field: Playfield, rng: &mut impl Rng) -> Obstacle {
    let r = BOMB_RADIUS;
    let cx = rng.gen_range(r..=(field.width - r).max(r));
    let cy = rng.gen_range(r..=(field.height - r).max(r));
    log::debug!("bomb placed at ({cx}, {cy})");
    Obstacle {
        rect: Rect::centered((cx, cy), 2 * r, 2 * r),
        velocity: BOMB_VELOCITY,
    }
}

/// An explosion centred where `obstacle` was.
pub fn new_effect(obstacle: &Obstacle) -> Effect {
    Effect {
        rect: Rect::centered(obstacle.rect.center(), EFFECT_SIZE.0, EFFECT_SIZE.1),
        countdown: EFFECT_LIFETIME,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply the held keys. A move that would leave the playfield is undone as a
/// whole; the facing still follows the keys.
pub fn move_player(player: &Player, keys: HeldKeys, field: Playfield) -> Player {
    let delta = keys.net_delta();
    let moved = player.rect.translated(delta);
    let rect = if fully_inside(&moved, field) {
        moved
    } else {
        player.rect
    };
    match Direction::from_delta(delta) {
        Some(facing) => Player {
            rect,
            facing,
            pose: Pose::Facing(facing),
        },
        None => Player {
            rect,
            ..player.clone()
        },
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Bounding box of the beam sprite rotated to face `direction`.
pub fn beam_extent(direction: Direction) -> (i32, i32) {
    let (w, h) = (BEAM_SIZE.0 as f64, BEAM_SIZE.1 as f64);
    let (sin, cos) = direction.angle_degrees().to_radians().sin_cos();
    let width = w * cos.abs() + h * sin.abs();
    let height = w * sin.abs() + h * cos.abs();
    (width.round() as i32, height.round() as i32)
}

/// Fire from the player's current facing. The beam starts one player-size
/// away from the player's centre, just past its leading edge.
pub fn spawn_projectile(player: &Player) -> Projectile {
    let direction = player.facing;
    let (vx, vy) = direction.delta();
    let (cx, cy) = player.rect.center();
    let center = (
        cx + player.rect.width * vx / STEP,
        cy + player.rect.height * vy / STEP,
    );
    let (width, height) = beam_extent(direction);
    Projectile {
        rect: Rect::centered(center, width, height),
        velocity: (vx, vy),
        direction,
        stalled: false,
    }
}

/// Move by the beam's velocity, unless it is already outside the playfield,
/// in which case it stays put (stalled) until the sweep removes it.
pub fn advance_projectile(projectile: &Projectile, field: Playfield) -> Projectile {
    if fully_inside(&projectile.rect, field) {
        Projectile {
            rect: projectile.rect.translated(projectile.velocity),
            stalled: false,
            ..projectile.clone()
        }
    } else {
        Projectile {
            stalled: true,
            ..projectile.clone()
        }
    }
}

// ── Obstacles ────────────────────────────────────────────────────────────────

/// Reflect off any wall the bomb is past, then always move.
pub fn advance_obstacle(obstacle: &Obstacle, field: Playfield) -> Obstacle {
    let (horizontal, vertical) = check_bound(&obstacle.rect, field);
    let (mut vx, mut vy) = obstacle.velocity;
    if !horizontal {
        vx = -vx;
    }
    if !vertical {
        vy = -vy;
    }
    Obstacle {
        rect: obstacle.rect.translated((vx, vy)),
        velocity: (vx, vy),
    }
}

// ── Effects ──────────────────────────────────────────────────────────────────

pub fn advance_effect(effect: &Effect) -> Effect {
    Effect {
        countdown: effect.countdown.saturating_sub(1),
        ..effect.clone()
    }
}

/// Which of the two explosion images to show, switching every 2 ticks.
/// `None` once the countdown has run out.
pub fn effect_frame(effect: &Effect) -> Option<u8> {
    if effect.countdown == 0 {
        return None;
    }
    let elapsed = EFFECT_LIFETIME.saturating_sub(effect.countdown);
    Some((elapsed / 2 % 2) as u8)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one tick.
///
/// Order: fire, player-vs-bomb check, beam-vs-bomb resolution, sweep of
/// spent beams and finished explosions, then movement. A game that is
/// already over is returned unchanged.
pub fn tick(state: &GameState, input: &TickInput) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let field = state.field;

    // ── 1. Fire ──────────────────────────────────────────────────────────────
    let mut projectiles = state.projectiles.clone();
    for _ in 0..input.shots {
        projectiles.push(spawn_projectile(&state.player));
    }

    // ── 2. Collision: bombs ↔ player ─────────────────────────────────────────
    if state
        .obstacles
        .iter()
        .any(|o| intersects(&o.rect, &state.player.rect))
    {
        log::info!(
            "player hit at frame {}, final score {}",
            state.frame,
            state.score
        );
        return GameState {
            player: Player {
                pose: Pose::Defeated,
                ..state.player.clone()
            },
            projectiles,
            status: GameStatus::GameOver,
            ..state.clone()
        };
    }

    // ── 3. Collision: beams ↔ bombs ──────────────────────────────────────────
    let mut destroyed: Vec<usize> = Vec::new();
    let mut spent: Vec<usize> = Vec::new();
    let mut spawned: Vec<Effect> = Vec::new();

    for (pi, projectile) in projectiles.iter().enumerate() {
        for (oi, obstacle) in state.obstacles.iter().enumerate() {
            if !destroyed.contains(&oi) && intersects(&projectile.rect, &obstacle.rect) {
                log::debug!("beam {pi} destroyed bomb {oi} at {:?}", obstacle.rect.center());
                destroyed.push(oi);
                spent.push(pi);
                spawned.push(new_effect(obstacle));
                break;
            }
        }
    }

    let score = state.score + spent.len() as u32;
    let player = if spent.is_empty() {
        state.player.clone()
    } else {
        Player {
            pose: Pose::Cheering,
            ..state.player.clone()
        }
    };

    let obstacles: Vec<&Obstacle> = state
        .obstacles
        .iter()
        .enumerate()
        .filter(|(i, _)| !destroyed.contains(i))
        .map(|(_, o)| o)
        .collect();

    // ── 4. Sweep: beams off the field, finished explosions ───────────────────
    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .enumerate()
        .filter(|(i, p)| !spent.contains(i) && fully_inside(&p.rect, field))
        .map(|(_, p)| p)
        .collect();

    let effects = state.effects.iter().filter(|e| e.countdown > 0);

    // ── 5. Move everything ───────────────────────────────────────────────────
    let player = move_player(&player, input.keys, field);
    let projectiles = projectiles
        .iter()
        .map(|p| advance_projectile(p, field))
        .collect();
    let obstacles = obstacles
        .into_iter()
        .map(|o| advance_obstacle(o, field))
        .collect();
    // Fresh explosions start counting down next tick.
    let effects = effects.map(advance_effect).chain(spawned).collect();

    let frame = state.frame + 1;
    log::trace!("frame {frame}: score {score}");

    GameState {
        player,
        obstacles,
        projectiles,
        effects,
        score,
        status: GameStatus::Running,
        frame,
        field,
    }
}
