mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bomb_blaster::compute::{init_state, tick};
use bomb_blaster::config::GameConfig;
use bomb_blaster::entities::{GameState, GameStatus, HeldKeys, TickInput};
use bomb_blaster::render::render;

use display::TerminalCanvas;

/// A key counts as held if its last press/repeat event arrived within this
/// long. Covers terminals that never send key-release events: OS key repeat
/// runs at 15 Hz or faster, so the window is refreshed before it expires.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

const MIN_TERMINAL: (u16, u16) = (40, 12);

// ── Command line ──────────────────────────────────────────────────────────────

/// Dodge the bouncing bombs and shoot them down.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of bombs at the start
    #[arg(long, default_value_t = 5)]
    obstacles: usize,

    /// Ticks per second
    #[arg(long, default_value_t = 50)]
    fps: u32,

    /// Seed for bomb placement
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds the defeat frame stays on screen
    #[arg(long, default_value_t = 1000)]
    hold_ms: u64,

    /// Write log records to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn to_config(&self) -> anyhow::Result<GameConfig> {
        ensure!((1..=240).contains(&self.fps), "--fps must be between 1 and 240");
        ensure!(self.obstacles <= 100, "--obstacles must be at most 100");
        Ok(GameConfig {
            obstacle_count: self.obstacles,
            frame_rate: self.fps,
            game_over_hold: Duration::from_millis(self.hold_ms),
            seed: self.seed,
            ..GameConfig::default()
        })
    }
}

/// Logging goes to a file only: anything on stderr would tear the
/// raw-mode screen.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Held keys ─────────────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn held_keys(key_frame: &HashMap<KeyCode, u64>, frame: u64, window: u64) -> HeldKeys {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame, window));
    HeldKeys {
        up: any(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        down: any(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Outcome {
    Quit,
    Lost,
}

/// Runs until the player quits or is hit.
///
/// Input model: `key_frame` records the frame of the last press/repeat event
/// for every key, and each frame the keys still "fresh" count as held. On
/// terminals with keyboard enhancement the release event drops the key at
/// once. Fire is edge-triggered: only `Press` events of Space count.
fn game_loop<W: Write>(
    canvas: &mut TerminalCanvas<W>,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<Outcome> {
    let interval = config.frame_interval();
    let window = (HOLD_WINDOW.as_millis() / interval.as_millis().max(1)) as u64 + 1;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut shots = 0;
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(Outcome::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(Outcome::Quit);
                            }
                            KeyCode::Char(' ') => shots += 1,
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(width, height) => canvas.resize(width, height),
                _ => {}
            }
        }

        let input = TickInput {
            keys: held_keys(&key_frame, frame, window),
            shots,
        };
        *state = tick(state, &input);
        render(canvas, state)?;

        if state.status == GameStatus::GameOver {
            thread::sleep(config.game_over_hold);
            return Ok(Outcome::Lost);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config()?;
    init_logging(cli.log_file.as_deref())?;

    let (width, height) = terminal::size().context("cannot query terminal size")?;
    ensure!(
        width >= MIN_TERMINAL.0 && height >= MIN_TERMINAL.1,
        "terminal is {width}x{height}, need at least {}x{}",
        MIN_TERMINAL.0,
        MIN_TERMINAL.1
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(&config, &mut rng);
    log::info!(
        "starting: {} bombs, {} Hz, seed {:?}",
        config.obstacle_count,
        config.frame_rate,
        config.seed
    );

    let mut term = stdout();
    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    term.execute(terminal::EnterAlternateScreen)?;
    term.execute(cursor::Hide)?;

    // Ask for key-release (and key-repeat) events; terminals without the
    // kitty protocol refuse and we fall back to the hold window.
    let keyboard_enhanced = term
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads get their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut canvas = TerminalCanvas::new(BufWriter::new(stdout()), (width, height), config.field);
    let result = game_loop(&mut canvas, &mut state, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = term.execute(PopKeyboardEnhancementFlags);
    }
    let _ = term.execute(cursor::Show);
    let _ = term.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result.context("game loop failed")? {
        Outcome::Quit => log::info!("quit at frame {}", state.frame),
        Outcome::Lost => log::info!("game over at frame {}", state.frame),
    }
    println!("Score: {}", state.score);
    Ok(())
}
