/// Rendering layer — all terminal I/O lives here.
///
/// The game thinks in an 800×600 pixel viewport.  [`render`] draws a session
/// onto any [`Canvas`]; [`TerminalCanvas`] scales that viewport onto the
/// terminal grid with crossterm.  No game logic is performed here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::consts::{MSG_PRESS_ANY_KEY, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Black;
const C_HUD: Color = Color::Yellow;
const C_MESSAGE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Viewport row of the status message; the prompt goes one line below.
const MESSAGE_Y: i32 = 280;
const PROMPT_Y: i32 = 320;

/// A surface that draws at viewport pixel coordinates.
pub trait Canvas {
    /// Blank the whole surface to the background colour.
    fn clear(&mut self) -> io::Result<()>;
    fn draw_glyphs(&mut self, x: i32, y: i32, glyphs: &str, color: Color) -> io::Result<()>;
    /// Horizontally centred line of text at viewport row `y`.
    fn draw_centered(&mut self, y: i32, text: &str, color: Color) -> io::Result<()>;
    /// Make everything drawn since `clear` visible.
    fn present(&mut self) -> io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, session: &Session) -> io::Result<()> {
    canvas.clear()?;

    for entity in session.world().iter() {
        entity
            .sprite()
            .draw(canvas, entity.x as i32, entity.y as i32)?;
    }

    canvas.draw_glyphs(0, 0, &format!("Aliens: {:>2}", session.alien_count()), C_HUD)?;

    if session.state().is_gated() {
        if !session.message().is_empty() {
            canvas.draw_centered(MESSAGE_Y, session.message(), C_MESSAGE)?;
        }
        canvas.draw_centered(PROMPT_Y, MSG_PRESS_ANY_KEY, C_HINT)?;
    }

    canvas.present()
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        TerminalCanvas { out, cols, rows }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Map a viewport pixel to a terminal cell, or `None` when it falls off
    /// the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 {
            return None;
        }
        let col = (x as f64 * self.cols as f64 / VIEWPORT_WIDTH) as u32;
        let row = (y as f64 * self.rows as f64 / VIEWPORT_HEIGHT) as u32;
        if col >= self.cols as u32 || row >= self.rows as u32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn print_at(&mut self, col: u16, row: u16, text: &str, color: Color) -> io::Result<()> {
        // Clip at the right edge so nothing wraps onto the next row.
        let room = self.cols.saturating_sub(col) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_glyphs(&mut self, x: i32, y: i32, glyphs: &str, color: Color) -> io::Result<()> {
        match self.cell(x, y) {
            Some((col, row)) => self.print_at(col, row, glyphs, color),
            None => Ok(()),
        }
    }

    fn draw_centered(&mut self, y: i32, text: &str, color: Color) -> io::Result<()> {
        let Some((_, row)) = self.cell(0, y) else {
            return Ok(());
        };
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.print_at(col, row, text, color)
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
