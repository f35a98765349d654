use bomb_blaster::compute::{new_player, tick};
use bomb_blaster::entities::*;
use bomb_blaster::geometry::{Playfield, Rect};
use bomb_blaster::render::{render, Canvas, Sprite};

/// Canvas that remembers the draw calls of the last frame.
#[derive(Default)]
struct Recorder {
    sprites: Vec<(Sprite, Rect)>,
    texts: Vec<(String, (i32, i32))>,
    cleared: usize,
    presented: usize,
}

impl Canvas for Recorder {
    fn clear(&mut self) -> std::io::Result<()> {
        self.sprites.clear();
        self.texts.clear();
        self.cleared += 1;
        Ok(())
    }

    fn draw(&mut self, sprite: Sprite, at: Rect) -> std::io::Result<()> {
        self.sprites.push((sprite, at));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, center: (i32, i32)) -> std::io::Result<()> {
        self.texts.push((text.to_string(), center));
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

impl Recorder {
    fn count(&self, pred: impl Fn(&Sprite) -> bool) -> usize {
        self.sprites.iter().filter(|(s, _)| pred(s)).count()
    }

    fn effects(&self) -> usize {
        self.count(|s| matches!(s, Sprite::Effect(_)))
    }
}

fn make_state() -> GameState {
    GameState {
        player: new_player((300, 200)),
        obstacles: Vec::new(),
        projectiles: Vec::new(),
        effects: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        field: Playfield::default(),
    }
}

fn bomb_at(center: (i32, i32)) -> Obstacle {
    Obstacle {
        rect: Rect::centered(center, 20, 20),
        velocity: (5, 5),
    }
}

#[test]
fn frame_is_cleared_and_presented_once() {
    let mut canvas = Recorder::default();
    render(&mut canvas, &make_state()).unwrap();
    assert_eq!(canvas.cleared, 1);
    assert_eq!(canvas.presented, 1);
}

#[test]
fn player_drawn_first_with_its_pose() {
    let mut canvas = Recorder::default();
    let s = make_state();
    render(&mut canvas, &s).unwrap();
    assert_eq!(
        canvas.sprites[0],
        (Sprite::Player(Pose::Facing(Direction::East)), s.player.rect)
    );
}

#[test]
fn score_text_near_lower_left() {
    let mut canvas = Recorder::default();
    let mut s = make_state();
    s.score = 7;
    render(&mut canvas, &s).unwrap();
    assert_eq!(canvas.texts, vec![("Score: 7".to_string(), (100, 600))]);
}

#[test]
fn stalled_beams_are_not_drawn() {
    let mut canvas = Recorder::default();
    let mut s = make_state();
    let beam = Projectile {
        rect: Rect::new(500, 100, 60, 20),
        velocity: (5, 0),
        direction: Direction::East,
        stalled: false,
    };
    s.projectiles.push(beam.clone());
    s.projectiles.push(Projectile { stalled: true, ..beam });
    render(&mut canvas, &s).unwrap();
    assert_eq!(canvas.count(|s| matches!(s, Sprite::Projectile(_))), 1);
}

#[test]
fn every_bomb_is_drawn() {
    let mut canvas = Recorder::default();
    let mut s = make_state();
    s.obstacles = vec![bomb_at((800, 100)), bomb_at((900, 500))];
    render(&mut canvas, &s).unwrap();
    assert_eq!(canvas.count(|s| *s == Sprite::Obstacle), 2);
}

#[test]
fn game_over_shows_defeat_and_banner() {
    let mut canvas = Recorder::default();
    let mut s = make_state();
    s.obstacles.push(bomb_at((310, 210)));
    let over = tick(&s, &TickInput::default());
    render(&mut canvas, &over).unwrap();
    assert_eq!(canvas.sprites[0].0, Sprite::Player(Pose::Defeated));
    assert!(canvas
        .texts
        .iter()
        .any(|(t, at)| t == "GAME OVER" && *at == (550, 325)));
}

#[test]
fn explosion_is_gone_twenty_one_ticks_later() {
    let mut canvas = Recorder::default();
    let mut s = make_state();
    s.obstacles = vec![bomb_at((350, 200)), bomb_at((900, 500))];

    // Tick T: the beam hits
    s = tick(&s, &TickInput { keys: HeldKeys::default(), shots: 1 });
    render(&mut canvas, &s).unwrap();
    assert_eq!(canvas.effects(), 1);

    for t in 1..=21 {
        s = tick(&s, &TickInput::default());
        render(&mut canvas, &s).unwrap();
        match t {
            1..=19 => assert_eq!(canvas.effects(), 1, "tick T+{t}"),
            _ => assert_eq!(canvas.effects(), 0, "tick T+{t}"),
        }
    }
    assert_eq!(s.status, GameStatus::Running);
    assert!(s.effects.is_empty());
}
