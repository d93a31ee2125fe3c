/// Rendering layer: all terminal I/O lives here.
///
/// `TerminalCanvas` implements `Canvas` by scaling screen pixels down to
/// terminal cells.  No game logic is performed; this module only translates
/// draw calls into terminal commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::{Image, Pixels};
use crate::config::GameConfig;
use crate::entities::Rect;
use crate::render::{Anchor, Canvas, Rgb, SKY};

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    world_width: i32,
    world_height: i32,
    /// Background colour of the last full-area fill; text is printed over it.
    backdrop: Color,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16, config: &GameConfig) -> Self {
        TerminalCanvas {
            out,
            cols,
            rows,
            world_width: config.width.max(1),
            world_height: config.height.max(1),
            backdrop: color(SKY),
        }
    }

    /// Adopt a new terminal size and wipe whatever the old layout left behind.
    pub fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        self.cols = cols;
        self.rows = rows;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Screen pixel → terminal cell.
    fn cell(&self, x: i32, y: i32) -> (i32, i32) {
        let col = x as i64 * self.cols as i64 / self.world_width as i64;
        let row = y as i64 * self.rows as i64 / self.world_height as i64;
        (col as i32, row as i32)
    }

    /// Print `text` at a cell, clipping anything outside the terminal.
    fn put(&mut self, col: i32, row: i32, text: &str) -> io::Result<()> {
        if row < 0 || row >= self.rows as i32 {
            return Ok(());
        }
        let skip = (-col).max(0) as usize;
        let start = col.max(0);
        let room = (self.cols as i32 - start).max(0) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(start as u16, row as u16))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn fill(&mut self, rect: Rect, glyph: char) -> io::Result<()> {
        let (left, top) = self.cell(rect.x, rect.y);
        let (right, bottom) = self.cell(rect.right(), rect.bottom());
        let width = (right - left).max(1) as usize;
        let line: String = std::iter::repeat(glyph).take(width).collect();
        for row in top..bottom.max(top + 1) {
            self.put(left, row, &line)?;
        }
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn draw_image(&mut self, image: &Image, x: i32, y: i32, _rotation: f64) -> io::Result<()> {
        // Cells cannot rotate; tilt is dropped.
        match &image.pixels {
            Pixels::Solid(' ') => {
                self.backdrop = color(image.color);
                self.out.queue(style::SetBackgroundColor(self.backdrop))?;
                self.fill(Rect::new(x, y, image.width, image.height), ' ')?;
            }
            Pixels::Solid(glyph) => {
                self.out.queue(style::SetBackgroundColor(self.backdrop))?;
                self.out.queue(style::SetForegroundColor(color(image.color)))?;
                self.fill(Rect::new(x, y, image.width, image.height), *glyph)?;
            }
            Pixels::Art(lines) => {
                let (col, row) = self.cell(x, y);
                self.out.queue(style::SetBackgroundColor(self.backdrop))?;
                self.out.queue(style::SetForegroundColor(color(image.color)))?;
                for (i, line) in lines.iter().enumerate() {
                    self.put(col, row + i as i32, line)?;
                }
            }
        }
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, rgb: Rgb, filled: bool) -> io::Result<()> {
        if filled {
            self.out.queue(style::SetBackgroundColor(color(rgb)))?;
            self.fill(rect, ' ')?;
            self.out.queue(style::SetBackgroundColor(self.backdrop))?;
            return Ok(());
        }

        let (left, top) = self.cell(rect.x, rect.y);
        let (right, bottom) = self.cell(rect.right(), rect.bottom());
        let inner = (right - left - 2).max(0) as usize;
        self.out.queue(style::SetForegroundColor(color(rgb)))?;
        self.put(left, top, &format!("┌{}┐", "─".repeat(inner)))?;
        for row in top + 1..bottom - 1 {
            self.put(left, row, "│")?;
            self.put(right - 1, row, "│")?;
        }
        self.put(left, bottom - 1, &format!("└{}┘", "─".repeat(inner)))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, rgb: Rgb, anchor: Anchor) -> io::Result<()> {
        let (mut col, row) = self.cell(x, y);
        if anchor == Anchor::Center {
            col -= text.chars().count() as i32 / 2;
        }
        self.out.queue(style::SetForegroundColor(color(rgb)))?;
        self.put(col, row, text)
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
