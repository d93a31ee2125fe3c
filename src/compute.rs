/// Game state machine and the per-tick simulation step.
///
/// Every public function mutates the `GameWorld` it is handed and returns the
/// side effects the frame driver must carry out.  All randomness comes through
/// the injected RNG so a seeded run is fully reproducible.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info};

use crate::animation::{advance_explosion, advance_jet, trigger_explosion};
use crate::audio::{Cue, Stinger};
use crate::config::GameConfig;
use crate::entities::{
    Effect, Explosion, FrameCounts, FrameTimer, GameWorld, Input, Jet, Phase, Progress,
};
use crate::generate::{create_pipe_pair, spawn_coin};
use crate::physics::{advance_coins, advance_pipes, collect_coins, hits_pipe, integrate_jet, jump, Boundary};

// ── Constructors ─────────────────────────────────────────────────────────────

fn fresh_jet(config: &GameConfig) -> Jet {
    Jet {
        x: config.jet_x,
        y: config.start_y(),
        velocity: 0.0,
        animation: FrameTimer::default(),
    }
}

/// Build the world for the first session, seeded with persisted progress.
pub fn init_state(
    config: GameConfig,
    frames: FrameCounts,
    progress: Progress,
    rng: &mut impl Rng,
) -> GameWorld {
    let mut pipes = VecDeque::new();
    pipes.push_back(create_pipe_pair(&config, rng));
    GameWorld {
        jet: fresh_jet(&config),
        pipes,
        coins: Vec::new(),
        coin_spawn_timer: 0,
        explosion: Explosion::default(),
        score: 0,
        coins_collected: 0,
        last_score: 0,
        progress,
        phase: Phase::Playing,
        frames,
        config,
    }
}

/// Start a new session: one fresh pipe pair, no coins, counters zeroed.
/// Persisted progress and the coin spawn timer carry over.
pub fn restart(world: &mut GameWorld, rng: &mut impl Rng) {
    world.jet = fresh_jet(&world.config);
    world.pipes.clear();
    world.pipes.push_back(create_pipe_pair(&world.config, rng));
    world.coins.clear();
    world.explosion = Explosion::default();
    world.score = 0;
    world.coins_collected = 0;
    world.phase = Phase::Playing;
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Apply one input event.  Quit is honoured in every phase; the rest only
/// where they make sense and are otherwise ignored.
pub fn handle_input(world: &mut GameWorld, input: Input, rng: &mut impl Rng) -> Vec<Effect> {
    match (input, world.phase) {
        (Input::Quit | Input::QuitRequested, _) => {
            info!(score = world.score, "quit");
            vec![Effect::Persist, Effect::Quit]
        }
        (Input::Jump, Phase::Playing) => {
            jump(&mut world.jet, &world.config);
            vec![Effect::Play(Cue::Jump)]
        }
        (Input::Restart, Phase::Waiting) => {
            restart(world, rng);
            info!("restart");
            vec![Effect::Play(Cue::MusicStart)]
        }
        (Input::ResetScores, Phase::Waiting) => {
            world.progress = Progress::default();
            world.coins_collected = 0;
            info!("scores reset");
            vec![Effect::Persist]
        }
        _ => Vec::new(),
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame in whatever phase the world is in.
pub fn tick(world: &mut GameWorld, rng: &mut impl Rng) -> Vec<Effect> {
    match world.phase {
        Phase::Playing => tick_playing(world, rng),
        Phase::Dying { frames_left } => tick_dying(world, frames_left, rng),
        Phase::Waiting => Vec::new(),
    }
}

fn tick_playing(world: &mut GameWorld, rng: &mut impl Rng) -> Vec<Effect> {
    let mut effects = Vec::new();
    let config = &world.config;

    // ── 1. Jet ───────────────────────────────────────────────────────────────
    let boundary = integrate_jet(&mut world.jet, config);

    // ── 2. Pipes ─────────────────────────────────────────────────────────────
    if advance_pipes(&mut world.pipes, config, rng) {
        world.score += config.pipe_reward;
        effects.push(Effect::Play(Cue::Score));
        debug!(score = world.score, "pipe passed");
    }

    // ── 3. Coins ─────────────────────────────────────────────────────────────
    world.coin_spawn_timer += 1;
    if world.coin_spawn_timer >= config.coin_spawn_interval {
        world.coins.push(spawn_coin(config, rng));
        world.coin_spawn_timer = 0;
    }
    advance_coins(&mut world.coins, config);

    // ── 4. Collisions: coins, then pipes and floor ───────────────────────────
    let jet_rect = world.jet.rect(config);
    let taken = collect_coins(&mut world.coins, &jet_rect);
    if taken > 0 {
        world.score += taken * config.coin_reward;
        world.coins_collected += taken;
        world.progress.total_coins += taken;
        effects.extend((0..taken).map(|_| Effect::Play(Cue::Coin)));
        debug!(coins = world.coins_collected, "coin collected");
    }

    if boundary == Boundary::Floor || hits_pipe(&world.pipes, &jet_rect) {
        effects.extend(enter_dying(world));
        return effects;
    }

    // ── 5. Animation ─────────────────────────────────────────────────────────
    advance_jet(&mut world.jet, world.config.jet_animation_speed, world.frames.jet);

    effects
}

/// Terminal collision: freeze the session, bank the score, start the explosion.
fn enter_dying(world: &mut GameWorld) -> Vec<Effect> {
    world.last_score = world.score;
    world.progress.high_score = world.progress.high_score.max(world.score);
    trigger_explosion(
        &mut world.explosion,
        world.jet.x,
        world.jet.y as i32,
        world.config.explosion_size,
    );
    world.phase = Phase::Dying {
        frames_left: world.config.dying_frames,
    };
    info!(
        score = world.score,
        high_score = world.progress.high_score,
        "session over"
    );
    vec![
        Effect::Persist,
        Effect::Play(Cue::Hit),
        Effect::Play(Cue::Explosion),
        Effect::Play(Cue::MusicStop),
    ]
}

fn tick_dying(world: &mut GameWorld, frames_left: u32, rng: &mut impl Rng) -> Vec<Effect> {
    advance_explosion(
        &mut world.explosion,
        world.config.explosion_speed,
        world.frames.explosion,
    );
    let frames_left = frames_left.saturating_sub(1);
    if frames_left > 0 {
        world.phase = Phase::Dying { frames_left };
        return Vec::new();
    }
    world.phase = Phase::Waiting;
    vec![Effect::Play(Cue::GameOver(Stinger::pick(rng)))]
}
