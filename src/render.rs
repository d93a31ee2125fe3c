/// Drawing contract between the game and whatever surface shows it.
///
/// The game only issues draw calls through `Canvas`, in a fixed order:
/// background, pipes, coins, jet (hidden while exploding), explosion, HUD.

use std::io;

use crate::animation::jet_rotation;
use crate::assets::{Image, Sprites};
use crate::entities::{GameWorld, Phase, Rect};

// ── Palette ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const NEON_GREEN: Rgb = Rgb(57, 255, 20);
pub const NEON_BLUE: Rgb = Rgb(0, 160, 255);
pub const GOLD: Rgb = Rgb(255, 215, 0);
pub const SKY: Rgb = Rgb(20, 40, 90);

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
}

/// An opaque drawable surface.  Coordinates are screen pixels.
pub trait Canvas {
    fn draw_image(&mut self, image: &Image, x: i32, y: i32, rotation: f64) -> io::Result<()>;
    fn draw_rect(&mut self, rect: Rect, color: Rgb, filled: bool) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb, anchor: Anchor) -> io::Result<()>;
    /// Flip the finished frame onto the screen.
    fn present(&mut self) -> io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for the current phase.
pub fn draw_frame<C: Canvas>(canvas: &mut C, world: &GameWorld, sprites: &Sprites) -> io::Result<()> {
    match world.phase {
        Phase::Playing => draw_scene(canvas, world, sprites, true)?,
        Phase::Dying { .. } => draw_scene(canvas, world, sprites, false)?,
        Phase::Waiting => draw_game_over(canvas, world, sprites)?,
    }
    canvas.present()
}

// ── Scene ─────────────────────────────────────────────────────────────────────

fn draw_scene<C: Canvas>(
    canvas: &mut C,
    world: &GameWorld,
    sprites: &Sprites,
    show_high_score: bool,
) -> io::Result<()> {
    let height = world.config.height;

    canvas.draw_image(&sprites.background, 0, 0, 0.0)?;

    for pair in &world.pipes {
        // Both pipe images are full screen height; the top one hangs from its gap.
        canvas.draw_image(&sprites.pipe_flipped, pair.top.x, pair.top.bottom() - height, 0.0)?;
        canvas.draw_image(&sprites.pipe, pair.bottom.x, pair.bottom.y, 0.0)?;
    }

    for coin in &world.coins {
        canvas.draw_image(&sprites.coin, coin.x, coin.y, 0.0)?;
    }

    // The jet is gone for the whole dying phase, even if the explosion ends early.
    if world.phase == Phase::Playing && !world.explosion.active {
        let jet = &world.jet;
        let image = sprites.jet_frame(jet.animation.frame, jet.is_thrusting());
        canvas.draw_image(image, jet.x, jet.y as i32, jet_rotation(jet))?;
    }

    let explosion = &world.explosion;
    if explosion.active {
        if let Some(image) = sprites.explosion.get(explosion.timer.frame) {
            canvas.draw_image(image, explosion.x, explosion.y, 0.0)?;
        }
    }

    draw_hud(canvas, world, show_high_score)
}

fn draw_hud<C: Canvas>(canvas: &mut C, world: &GameWorld, show_high_score: bool) -> io::Result<()> {
    canvas.draw_text(&format!("Score: {}", world.score), 10, 10, WHITE, Anchor::Left)?;
    canvas.draw_text(&format!("Coins: {}", world.coins_collected), 10, 40, GOLD, Anchor::Left)?;
    if show_high_score {
        canvas.draw_text(
            &format!("High Score: {}", world.progress.high_score),
            10,
            70,
            NEON_BLUE,
            Anchor::Left,
        )?;
    }
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<C: Canvas>(canvas: &mut C, world: &GameWorld, sprites: &Sprites) -> io::Result<()> {
    let cx = world.config.width / 2;
    let h = world.config.height;

    canvas.draw_image(&sprites.background, 0, 0, 0.0)?;
    canvas.draw_text("GAME OVER", cx, h / 5, NEON_BLUE, Anchor::Center)?;

    let score_box = Rect::new(cx - 50, h / 3, 100, 130);
    canvas.draw_rect(score_box, WHITE, true)?;
    canvas.draw_rect(score_box, BLACK, false)?;

    let lines: [(String, i32, Rgb); 4] = [
        ("SCORE".to_string(), 10, RED),
        (world.last_score.to_string(), 40, BLACK),
        ("BEST".to_string(), 70, RED),
        (world.progress.high_score.to_string(), 100, BLACK),
    ];
    for (text, offset, color) in &lines {
        canvas.draw_text(text, cx, h / 3 + offset, *color, Anchor::Center)?;
    }

    let hints: [(&str, i32, Rgb); 3] = [
        ("Press R to Restart", 50, NEON_GREEN),
        ("Press Q to Quit", 90, NEON_BLUE),
        ("Press Z to Reset Scores", 130, RED),
    ];
    for (text, offset, color) in hints {
        canvas.draw_text(text, cx, h / 2 + offset, color, Anchor::Center)?;
    }
    Ok(())
}
