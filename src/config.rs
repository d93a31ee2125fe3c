/// Tunable constants and runtime settings.
///
/// `GameConfig` carries every number the simulation depends on so tests can
/// build a world with explicit geometry.  `Settings` is everything the binary
/// reads from the environment at start-up.

use std::path::PathBuf;

// ── Simulation constants ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,

    /// Fixed horizontal position of the jet.
    pub jet_x: i32,
    /// Collision box of the jet (size of the first animation frame).
    pub jet_width: i32,
    pub jet_height: i32,

    pub gravity: f64,
    /// Velocity assigned on jump.  Negative is upward.
    pub jump_strength: f64,
    /// Multiplier applied to velocity every tick.
    pub air_resistance: f64,

    pub pipe_width: i32,
    pub pipe_gap: i32,
    /// Leftward pixels per tick.
    pub pipe_velocity: i32,
    pub gap_margin_top: i32,
    pub gap_margin_bottom: i32,

    pub coin_size: i32,
    pub coin_speed: i32,
    /// Ticks between coin spawns.
    pub coin_spawn_interval: u32,
    /// Distance kept between a freshly spawned coin and the top/bottom edges.
    pub coin_margin: i32,

    pub coin_reward: u32,
    pub pipe_reward: u32,

    pub jet_animation_speed: f64,
    pub explosion_speed: f64,
    /// Side of the square explosion sprite, centred on the jet origin.
    pub explosion_size: i32,
    /// Frames spent in the dying phase before the game-over screen.
    pub dying_frames: u32,

    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 800,
            height: 650,
            jet_x: 50,
            jet_width: 90,
            jet_height: 50,
            gravity: 0.2,
            jump_strength: -6.5,
            air_resistance: 0.95,
            pipe_width: 100,
            pipe_gap: 200,
            pipe_velocity: 4,
            gap_margin_top: 100,
            gap_margin_bottom: 100,
            coin_size: 30,
            coin_speed: 3,
            coin_spawn_interval: 150,
            coin_margin: 100,
            coin_reward: 5,
            pipe_reward: 1,
            jet_animation_speed: 0.2,
            explosion_speed: 0.4,
            explosion_size: 120,
            dying_frames: 10,
            ticks_per_second: 60,
        }
    }
}

impl GameConfig {
    /// Vertical position the jet starts each session at.
    pub fn start_y(&self) -> f64 {
        (self.height / 2) as f64
    }

    /// Lowest y the jet can reach; touching it ends the session.
    pub fn floor_y(&self) -> f64 {
        (self.height - self.jet_height) as f64
    }
}

// ── Runtime settings ─────────────────────────────────────────────────────────

const ENV_SAVE: &str = "FLAPPY_JET_SAVE";
const ENV_ASSETS: &str = "FLAPPY_JET_ASSETS";
const ENV_SEED: &str = "FLAPPY_JET_SEED";
const ENV_LOG: &str = "FLAPPY_JET_LOG";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub save_path: PathBuf,
    pub assets_dir: PathBuf,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Log destination; `None` disables logging.
    pub log_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.  Empty or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let save_path = get(ENV_SAVE)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_save_path(get("HOME")));
        let assets_dir = get(ENV_ASSETS)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets"));
        let seed = get(ENV_SEED).and_then(|s| s.trim().parse().ok());
        let log_path = get(ENV_LOG).map(PathBuf::from);

        Settings {
            save_path,
            assets_dir,
            seed,
            log_path,
        }
    }
}

fn default_save_path(home: Option<String>) -> PathBuf {
    let home = home.unwrap_or_else(|| ".".to_string());
    PathBuf::from(home).join(".flappy_jet_save.json")
}
