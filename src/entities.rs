/// All game entity types: pure data, no logic beyond geometry helpers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::audio::Cue;
use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect,
    /// and an empty rectangle never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.width > 0
            && self.height > 0
            && other.width > 0
            && other.height > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

/// Fractional frame accumulator shared by the jet and explosion animations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameTimer {
    pub frame: usize,
    pub counter: f64,
}

/// How many frames each animated sprite has.  Comes from the resolved assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCounts {
    pub jet: usize,
    pub explosion: usize,
}

impl Default for FrameCounts {
    fn default() -> Self {
        FrameCounts { jet: 1, explosion: 6 }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Jet {
    pub x: i32,
    pub y: f64,
    pub velocity: f64,
    pub animation: FrameTimer,
}

impl Jet {
    /// Collision box.  Always the size of the first animation frame,
    /// whatever frame or rotation is on screen.
    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y as i32, config.jet_width, config.jet_height)
    }

    /// Ascending jets show the thrust sprite.
    pub fn is_thrusting(&self) -> bool {
        self.velocity < 0.0
    }
}

// ── Obstacles & pickups ───────────────────────────────────────────────────────

/// Top and bottom obstacle sharing one gap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipePair {
    pub top: Rect,
    pub bottom: Rect,
}

impl PipePair {
    pub fn x(&self) -> i32 {
        self.top.x
    }

    pub fn gap_start(&self) -> i32 {
        self.top.bottom()
    }
}

pub type Coin = Rect;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Explosion {
    pub active: bool,
    /// Top-left corner of the explosion sprite.
    pub x: i32,
    pub y: i32,
    pub timer: FrameTimer,
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Counters that survive restarts of the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub high_score: u32,
    pub total_coins: u32,
}

// ── Phase, input, effects ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Explosion playing over the frozen scene.
    Dying { frames_left: u32 },
    /// Game-over screen, waiting for restart / quit / reset.
    Waiting,
}

/// Discrete input events polled once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Window closed / input stream lost.
    QuitRequested,
    Jump,
    Restart,
    Quit,
    ResetScores,
}

/// Side effects requested by the simulation.  The frame driver carries them
/// out; the simulation itself never touches audio or the file system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Play(Cue),
    /// Write `Progress` to the save file.
    Persist,
    /// Terminate the process (always preceded by `Persist`).
    Quit,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the frame driver owns.  Cloneable so tests can compare runs.
#[derive(Clone, Debug, PartialEq)]
pub struct GameWorld {
    pub config: GameConfig,
    pub frames: FrameCounts,
    pub jet: Jet,
    /// Oldest pair at the front.
    pub pipes: VecDeque<PipePair>,
    pub coins: Vec<Coin>,
    /// Not reset on restart.
    pub coin_spawn_timer: u32,
    pub explosion: Explosion,
    pub score: u32,
    pub coins_collected: u32,
    /// Score of the most recently ended session, shown on the game-over screen.
    pub last_score: u32,
    pub progress: Progress,
    pub phase: Phase,
}
