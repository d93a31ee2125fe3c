/// Sprite resolution with procedural fallbacks.
///
/// Sprites are text art read from an assets directory:
///
/// * `jet.txt`: one or more frames separated by `---` lines
/// * `explosion.txt`: same format
/// * `coin.txt`: a single frame
///
/// Any file that is missing, unreadable or empty is replaced by a built-in
/// placeholder, so gameplay never depends on files being present.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::entities::FrameCounts;
use crate::render::{Rgb, GOLD, SKY};

const FRAME_SEPARATOR: &str = "---";

const C_PIPE: Rgb = Rgb(60, 200, 60);
const C_JET: Rgb = Rgb(200, 200, 200);
const C_THRUST: Rgb = Rgb(100, 200, 255);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("sprite I/O: {0}")]
    Io(#[from] io::Error),
    #[error("sprite file has no frames")]
    Empty,
}

// ── Images ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Pixels {
    /// Fill the whole image area with one glyph.  A space paints the
    /// background colour instead.
    Solid(char),
    /// Text art anchored at the image's top-left corner.
    Art(Vec<String>),
}

/// A drawable image: its nominal pixel size plus how to paint it.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: i32,
    pub height: i32,
    pub pixels: Pixels,
    pub color: Rgb,
}

impl Image {
    fn art(width: i32, height: i32, lines: Vec<String>, color: Rgb) -> Self {
        Image {
            width,
            height,
            pixels: Pixels::Art(lines),
            color,
        }
    }
}

/// Every image the game draws.
#[derive(Clone, Debug)]
pub struct Sprites {
    pub background: Image,
    pub pipe: Image,
    pub pipe_flipped: Image,
    pub coin: Image,
    pub jet: Vec<Image>,
    /// One thrust variant per jet frame.
    pub thrust: Vec<Image>,
    pub explosion: Vec<Image>,
}

impl Sprites {
    /// All placeholders; no file system access.
    pub fn placeholder(config: &GameConfig) -> Self {
        let jet = vec![placeholder_jet(config)];
        Self::assemble(config, jet, placeholder_explosion(config), placeholder_coin(config))
    }

    /// Load what exists under `dir`, substituting placeholders for the rest.
    pub fn resolve(dir: &Path, config: &GameConfig) -> Self {
        let jet = match read_frames(&dir.join("jet.txt")) {
            Ok(frames) => frames
                .into_iter()
                .map(|lines| Image::art(config.jet_width, config.jet_height, lines, C_JET))
                .collect(),
            Err(e) => {
                warn!(error = %e, "jet sprite unavailable, using placeholder");
                vec![placeholder_jet(config)]
            }
        };

        let size = config.explosion_size;
        let explosion = match read_frames(&dir.join("explosion.txt")) {
            Ok(frames) => frames
                .into_iter()
                .map(|lines| Image::art(size, size, lines, Rgb(255, 140, 0)))
                .collect(),
            Err(e) => {
                warn!(error = %e, "explosion sprite unavailable, using placeholder");
                placeholder_explosion(config)
            }
        };

        let coin = match read_frames(&dir.join("coin.txt")) {
            Ok(mut frames) => Image::art(config.coin_size, config.coin_size, frames.swap_remove(0), GOLD),
            Err(e) => {
                warn!(error = %e, "coin sprite unavailable, using placeholder");
                placeholder_coin(config)
            }
        };

        let sprites = Self::assemble(config, jet, explosion, coin);
        debug!(frames = ?sprites.frame_counts(), dir = %dir.display(), "sprites resolved");
        sprites
    }

    fn assemble(config: &GameConfig, jet: Vec<Image>, explosion: Vec<Image>, coin: Image) -> Self {
        let thrust = jet.iter().map(thrust_frame).collect();
        Sprites {
            background: Image {
                width: config.width,
                height: config.height,
                pixels: Pixels::Solid(' '),
                color: SKY,
            },
            pipe: Image {
                width: config.pipe_width,
                height: config.height,
                pixels: Pixels::Solid('█'),
                color: C_PIPE,
            },
            pipe_flipped: Image {
                width: config.pipe_width,
                height: config.height,
                pixels: Pixels::Solid('█'),
                color: C_PIPE,
            },
            coin,
            jet,
            thrust,
            explosion,
        }
    }

    pub fn frame_counts(&self) -> FrameCounts {
        FrameCounts {
            jet: self.jet.len(),
            explosion: self.explosion.len(),
        }
    }

    /// Idle or thrust variant of a jet frame.  Out-of-range frames wrap.
    pub fn jet_frame(&self, frame: usize, thrusting: bool) -> &Image {
        let frames = if thrusting { &self.thrust } else { &self.jet };
        &frames[frame % frames.len()]
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

fn read_frames(path: &Path) -> Result<Vec<Vec<String>>, AssetError> {
    let text = fs::read_to_string(path)?;
    parse_frames(&text)
}

/// Split text art into frames on `---` lines, dropping blank frames.
pub fn parse_frames(text: &str) -> Result<Vec<Vec<String>>, AssetError> {
    let mut frames = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in text.lines() {
        if line.trim() == FRAME_SEPARATOR {
            frames.push(std::mem::take(&mut current));
        } else {
            current.push(line.trim_end().to_string());
        }
    }
    frames.push(current);

    let frames: Vec<Vec<String>> = frames
        .into_iter()
        .map(|mut lines| {
            while lines.last().is_some_and(|l| l.is_empty()) {
                lines.pop();
            }
            while lines.first().is_some_and(|l| l.is_empty()) {
                lines.remove(0);
            }
            lines
        })
        .filter(|lines| !lines.is_empty())
        .collect();

    if frames.is_empty() {
        return Err(AssetError::Empty);
    }
    Ok(frames)
}

// ── Placeholders ──────────────────────────────────────────────────────────────

fn placeholder_jet(config: &GameConfig) -> Image {
    let lines = vec![
        "  __".to_string(),
        "=[__>>".to_string(),
    ];
    Image::art(config.jet_width, config.jet_height, lines, C_JET)
}

/// Six frames of a growing fireball.
fn placeholder_explosion(config: &GameConfig) -> Vec<Image> {
    const GLYPHS: [char; 6] = ['*', '✶', '✹', '@', '░', '·'];
    const COLS: i32 = 15;
    const ROWS: i32 = 6;

    GLYPHS
        .iter()
        .enumerate()
        .map(|(i, &glyph)| {
            let radius = 1.0 + i as f64;
            let lines = (0..ROWS)
                .map(|row| {
                    (0..COLS)
                        .map(|col| {
                            // Cells are about twice as tall as wide.
                            let dx = (col - COLS / 2) as f64 / 2.0;
                            let dy = (row - ROWS / 2) as f64;
                            if (dx * dx + dy * dy).sqrt() <= radius { glyph } else { ' ' }
                        })
                        .collect::<String>()
                        .trim_end()
                        .to_string()
                })
                .collect();
            Image::art(config.explosion_size, config.explosion_size, lines, Rgb(255, 165 - i as u8 * 20, 0))
        })
        .collect()
}

fn placeholder_coin(config: &GameConfig) -> Image {
    Image::art(config.coin_size, config.coin_size, vec!["(●)".to_string()], GOLD)
}

/// The same frame with an engine glow trailing behind it.
fn thrust_frame(base: &Image) -> Image {
    let pixels = match &base.pixels {
        Pixels::Art(lines) => {
            let glow_row = lines.len().saturating_sub(1);
            Pixels::Art(
                lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| {
                        if i == glow_row {
                            format!("≈{}", line)
                        } else {
                            format!(" {}", line)
                        }
                    })
                    .collect(),
            )
        }
        solid => solid.clone(),
    };
    Image {
        pixels,
        color: C_THRUST,
        ..base.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_split_on_separator() {
        let frames = parse_frames("ab\ncd\n---\nef\n").unwrap();
        assert_eq!(frames, vec![vec!["ab", "cd"], vec!["ef"]]);
    }

    #[test]
    fn blank_frames_are_dropped() {
        let frames = parse_frames("\n---\n  x\n\n---\n\n").unwrap();
        assert_eq!(frames, vec![vec!["  x"]]);
    }

    #[test]
    fn empty_text_is_an_error() {
        assert!(matches!(parse_frames("\n\n---\n"), Err(AssetError::Empty)));
    }

    #[test]
    fn placeholder_matches_fallback_frame_counts() {
        let sprites = Sprites::placeholder(&GameConfig::default());
        assert_eq!(sprites.frame_counts(), FrameCounts { jet: 1, explosion: 6 });
        assert_eq!(sprites.thrust.len(), sprites.jet.len());
    }

    #[test]
    fn thrust_frame_adds_glow() {
        let sprites = Sprites::placeholder(&GameConfig::default());
        let Pixels::Art(lines) = &sprites.jet_frame(0, true).pixels else {
            panic!("jet placeholder should be art");
        };
        assert!(lines.last().unwrap().starts_with('≈'));
    }
}
