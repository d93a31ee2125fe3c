use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
    ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flappy_jet::assets::Sprites;
use flappy_jet::audio::{AudioSink, BellAudio};
use flappy_jet::config::{GameConfig, Settings};
use flappy_jet::display::TerminalCanvas;
use flappy_jet::driver::{Control, Driver};
use flappy_jet::entities::Input;
use flappy_jet::persistence::SaveStore;
use flappy_jet::render::draw_frame;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs only go to a file, and only
/// when one was asked for.
fn init_logging(settings: &Settings) {
    let Some(path) = &settings.log_path else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

// ── Signals ───────────────────────────────────────────────────────────────────

/// Raised when the terminal goes away (SIGHUP) or the process is asked to
/// stop (SIGTERM), so the frame loop can save and leave like a quit key.
#[cfg(unix)]
fn watch_close_signals() -> std::io::Result<Arc<AtomicBool>> {
    use signal_hook::consts::{SIGHUP, SIGTERM};

    let flag = Arc::new(AtomicBool::new(false));
    for signal in [SIGHUP, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&flag))?;
    }
    Ok(flag)
}

#[cfg(not(unix))]
fn watch_close_signals() -> std::io::Result<Arc<AtomicBool>> {
    Ok(Arc::new(AtomicBool::new(false)))
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => Some(Input::Jump),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Input::QuitRequested)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Input::Restart),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Input::ResetScores),
        _ => None,
    }
}

/// Drain every event already waiting, without blocking.  Resizes are applied
/// to the canvas directly; a broken input stream or a close signal counts as
/// a close request.
fn poll_inputs<W: Write>(canvas: &mut TerminalCanvas<W>, closed: &AtomicBool) -> std::io::Result<Vec<Input>> {
    let mut inputs = Vec::new();
    if closed.load(Ordering::Relaxed) {
        inputs.push(Input::QuitRequested);
        return Ok(inputs);
    }
    loop {
        match event::poll(Duration::ZERO) {
            Ok(false) => break,
            Ok(true) => {}
            Err(_) => {
                inputs.push(Input::QuitRequested);
                break;
            }
        }
        match event::read() {
            Ok(Event::Key(key)) => inputs.extend(map_key(key)),
            Ok(Event::Resize(cols, rows)) => canvas.resize(cols, rows)?,
            Ok(_) => {}
            Err(_) => {
                inputs.push(Input::QuitRequested);
                break;
            }
        }
    }
    Ok(inputs)
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(out: W) -> std::io::Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings);

    let config = GameConfig::default();
    let sprites = Sprites::resolve(&settings.assets_dir, &config);
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time = Duration::from_secs(1) / config.ticks_per_second.max(1);

    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(out, cols, rows, &config);
    let mut driver = Driver::new(
        config,
        sprites.frame_counts(),
        SaveStore::new(settings.save_path.clone()),
        BellAudio::new(std::io::stderr()),
        rng,
    );
    info!(save = %settings.save_path.display(), seed = ?settings.seed, "flappy jet started");

    let closed = watch_close_signals()?;
    let result = game_loop(&mut driver, &mut canvas, &sprites, &closed, frame_time);
    if result.is_err() {
        // Leaving without a quit effect; keep what was earned this session.
        driver.persist();
    }

    info!("flappy jet stopped");
    result
}

fn game_loop<W: Write, A: AudioSink, R: Rng>(
    driver: &mut Driver<A, R>,
    canvas: &mut TerminalCanvas<W>,
    sprites: &Sprites,
    closed: &AtomicBool,
    frame_time: Duration,
) -> std::io::Result<()> {
    loop {
        let frame_start = Instant::now();

        let inputs = poll_inputs(canvas, closed)?;
        if driver.frame(&inputs) == Control::Quit {
            return Ok(());
        }
        draw_frame(canvas, &driver.world, sprites)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let result = run(&mut out);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        warn!(error = %e, "terminal failure");
    }
    result
}
