/// Sprite assets and the cache that hands them out.
///
/// Sprites are resolved from a small built-in table keyed by the same
/// symbolic references the game uses (`"sprites/ship.gif"` …).  The pixel
/// size drives collision bounds; the glyphs are what the terminal canvas
/// prints.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::rc::Rc;

use crossterm::style::Color;

use crate::consts::{ALIEN_SPRITE, SHIP_SPRITE, SHOT_SPRITE};
use crate::display::Canvas;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SpriteError {
    /// No asset is registered under this reference.
    NotFound(String),
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteError::NotFound(r) => write!(f, "can't find sprite ref: {r}"),
        }
    }
}

impl std::error::Error for SpriteError {}

// ── Sprite ────────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub struct Sprite {
    reference: String,
    width: i32,
    height: i32,
    glyphs: &'static str,
    color: Color,
}

impl Sprite {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Width in viewport pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in viewport pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn glyphs(&self) -> &'static str {
        self.glyphs
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Draw at an integer viewport position.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, x: i32, y: i32) -> io::Result<()> {
        canvas.draw_glyphs(x, y, self.glyphs, self.color)
    }
}

/// (reference, width, height, glyphs, colour)
const BUILTIN: &[(&str, i32, i32, &str, Color)] = &[
    (SHIP_SPRITE, 32, 24, "/▲\\", Color::White),
    (ALIEN_SPRITE, 28, 20, "«▼»", Color::Green),
    (SHOT_SPRITE, 6, 16, "║", Color::Cyan),
];

// ── Store ─────────────────────────────────────────────────────────────────────

/// Owned sprite cache.  The same reference always yields the same handle.
#[derive(Debug, Default)]
pub struct SpriteStore {
    sprites: HashMap<String, Rc<Sprite>>,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, reference: &str) -> Result<Rc<Sprite>, SpriteError> {
        if let Some(sprite) = self.sprites.get(reference) {
            return Ok(Rc::clone(sprite));
        }

        let &(_, width, height, glyphs, color) = BUILTIN
            .iter()
            .find(|(r, ..)| *r == reference)
            .ok_or_else(|| SpriteError::NotFound(reference.to_string()))?;

        let sprite = Rc::new(Sprite {
            reference: reference.to_string(),
            width,
            height,
            glyphs,
            color,
        });
        log::debug!("loaded sprite {reference} ({width}x{height})");
        self.sprites.insert(reference.to_string(), Rc::clone(&sprite));
        Ok(sprite)
    }

    /// Number of sprites resolved so far.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
