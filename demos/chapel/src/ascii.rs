//! A text render surface: the chapel as a grid of glyphs.

use std::io::Write;

use molt_agent::Sprite;
use molt_core::{AgentRole, Frame, Skin};
use molt_sim::Surface;

/// Canvas units per character cell.
const CELL_W: f32 = 2.0;
const CELL_H: f32 = 4.0;

/// Prints the whole grid to a writer every `every` frames.
pub struct AsciiSurface<W: Write> {
    out:     W,
    cols:    usize,
    rows:    usize,
    every:   u64,
    grid:    Vec<char>,
    active:  bool,
    printed: usize,
}

impl<W: Write> AsciiSurface<W> {
    /// `width`/`height` in canvas units.
    pub fn new(out: W, width: f32, height: f32, every: u64) -> Self {
        let cols = (width / CELL_W).ceil() as usize;
        let rows = (height / CELL_H).ceil() as usize;
        Self {
            out,
            cols,
            rows,
            every: every.max(1),
            grid: vec![' '; cols * rows],
            active: false,
            printed: 0,
        }
    }

    /// Frames printed so far.
    pub fn printed(&self) -> usize {
        self.printed
    }

    fn glyph(sprite: &Sprite) -> char {
        match (sprite.role, sprite.skin) {
            (AgentRole::Icon, Skin::Lobster) => '&',
            (AgentRole::Icon, Skin::Moltbot) => '+',
            (AgentRole::Preacher, _) => 'P',
            (AgentRole::Procession, _) if sprite.claws_out => 'M',
            (AgentRole::Procession, _) => 'm',
            (AgentRole::Congregation, _) if sprite.claws_out => 'C',
            (AgentRole::Congregation, _) => 'c',
        }
    }

    fn print(&mut self, frame: Frame) {
        let mut text = String::with_capacity((self.cols + 1) * (self.rows + 2));
        text.push_str(&format!("── {frame} "));
        text.push_str(&"─".repeat(self.cols.saturating_sub(8)));
        text.push('\n');
        for row in self.grid.chunks(self.cols) {
            text.extend(row.iter());
            text.push('\n');
        }
        // Rendering is best-effort; a closed pipe must not stop the run.
        let _ = self.out.write_all(text.as_bytes());
        self.printed += 1;
    }
}

impl<W: Write> Surface for AsciiSurface<W> {
    fn begin_frame(&mut self, frame: Frame) {
        self.active = frame.0.is_multiple_of(self.every);
        if self.active {
            self.grid.fill(' ');
        }
    }

    fn draw(&mut self, sprite: &Sprite, _frame: Frame) {
        if !self.active {
            return;
        }
        let col = (sprite.pos.x / CELL_W).round();
        let row = (sprite.pos.y / CELL_H).round();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.cols && row < self.rows {
            self.grid[row * self.cols + col] = Self::glyph(sprite);
        }
    }

    fn end_frame(&mut self, frame: Frame) {
        if self.active {
            self.print(frame);
        }
    }

    fn release(&mut self) {
        let _ = self.out.flush();
    }
}
