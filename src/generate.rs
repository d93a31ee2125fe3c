/// Procedural spawning of pipe pairs and coins.
///
/// Pure functions of screen geometry plus the injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Coin, PipePair, Rect};

/// Build a pipe pair just beyond the right edge.  The top of the gap is drawn
/// uniformly from `[margin_top, height - gap - margin_bottom]` (inclusive).
pub fn create_pipe_pair(config: &GameConfig, rng: &mut impl Rng) -> PipePair {
    let low = config.gap_margin_top;
    let high = config.height - config.pipe_gap - config.gap_margin_bottom;
    // Screens too short for both margins pin the gap to the top margin.
    let gap_start = if high > low { rng.gen_range(low..=high) } else { low };

    PipePair {
        top: Rect::new(config.width, 0, config.pipe_width, gap_start),
        bottom: Rect::new(
            config.width,
            gap_start + config.pipe_gap,
            config.pipe_width,
            config.height - gap_start - config.pipe_gap,
        ),
    }
}

/// A square coin at a random height, just beyond the right edge.
pub fn spawn_coin(config: &GameConfig, rng: &mut impl Rng) -> Coin {
    let low = config.coin_margin;
    let high = config.height - config.coin_margin;
    let y = if high > low { rng.gen_range(low..=high) } else { low };
    Rect::new(config.width, y, config.coin_size, config.coin_size)
}
