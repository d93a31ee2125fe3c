/// Fixed-step motion and bounding-box collision.
///
/// One call per rendered frame; nothing here depends on wall-clock time.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Coin, FrameTimer, Jet, PipePair, Rect};
use crate::generate::create_pipe_pair;

/// Which screen edge, if any, the jet touched this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Clear,
    /// Clamped to the top.  Not terminal.
    Ceiling,
    /// Clamped to the floor.  Terminal.
    Floor,
}

// ── Jet ───────────────────────────────────────────────────────────────────────

/// `v' = (v + g) * damping`, `y' = y + v'`, then clamp to the screen.
pub fn integrate_jet(jet: &mut Jet, config: &GameConfig) -> Boundary {
    jet.velocity += config.gravity;
    jet.velocity *= config.air_resistance;
    jet.y += jet.velocity;

    let mut boundary = Boundary::Clear;
    if jet.y <= 0.0 {
        jet.y = 0.0;
        jet.velocity = 0.0;
        boundary = Boundary::Ceiling;
    }
    let floor = config.floor_y();
    if jet.y >= floor {
        jet.y = floor;
        jet.velocity = 0.0;
        boundary = Boundary::Floor;
    }
    boundary
}

/// Override velocity with the jump constant and restart the jet animation.
pub fn jump(jet: &mut Jet, config: &GameConfig) {
    jet.velocity = config.jump_strength;
    jet.animation = FrameTimer::default();
}

// ── Scrolling ─────────────────────────────────────────────────────────────────

/// Scroll every pair left, then recycle the oldest pair once it is fully off
/// screen.  Returns `true` when a pair was recycled (the jet passed it).
pub fn advance_pipes(
    pipes: &mut VecDeque<PipePair>,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> bool {
    for pair in pipes.iter_mut() {
        pair.top.x -= config.pipe_velocity;
        pair.bottom.x -= config.pipe_velocity;
    }

    let off_screen = pipes
        .front()
        .map(|pair| pair.x() < -config.pipe_width)
        .unwrap_or(false);
    if off_screen {
        pipes.pop_front();
        pipes.push_back(create_pipe_pair(config, rng));
    }
    off_screen
}

/// Scroll coins left and drop those whose right edge has left the screen.
pub fn advance_coins(coins: &mut Vec<Coin>, config: &GameConfig) {
    for coin in coins.iter_mut() {
        coin.x -= config.coin_speed;
    }
    coins.retain(|coin| coin.right() >= 0);
}

// ── Collision ─────────────────────────────────────────────────────────────────

/// Remove every coin touching `jet` and return how many were taken.
pub fn collect_coins(coins: &mut Vec<Coin>, jet: &Rect) -> u32 {
    let before = coins.len();
    coins.retain(|coin| !jet.intersects(coin));
    (before - coins.len()) as u32
}

pub fn hits_pipe(pipes: &VecDeque<PipePair>, jet: &Rect) -> bool {
    pipes
        .iter()
        .any(|pair| pair.top.intersects(jet) || pair.bottom.intersects(jet))
}
