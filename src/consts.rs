//! Fixed game constants.  There is no runtime configuration: every round
//! plays with exactly these numbers.

// ── Viewport ─────────────────────────────────────────────────────────────────

pub const VIEWPORT_WIDTH: f64 = 800.0;
pub const VIEWPORT_HEIGHT: f64 = 600.0;

/// Entities moving left stop (ship) or turn the swarm (aliens) past this x.
pub const LEFT_WALL: f64 = 10.0;
/// Same for moving right.  Not adjusted for sprite width.
pub const RIGHT_WALL: f64 = 750.0;

/// Shots above this y are off screen and get removed.
pub const SHOT_CEILING: f64 = -100.0;

// ── Ship ─────────────────────────────────────────────────────────────────────

pub const SHIP_START: (f64, f64) = (370.0, 550.0);
/// Pixels per second while a direction key is held.
pub const SHIP_SPEED: f64 = 300.0;

// ── Aliens ───────────────────────────────────────────────────────────────────

pub const ALIEN_ROWS: usize = 5;
pub const ALIEN_COLUMNS: usize = 12;
pub const ALIEN_ORIGIN: (f64, f64) = (100.0, 50.0);
pub const ALIEN_SPACING_X: f64 = 50.0;
pub const ALIEN_SPACING_Y: f64 = 30.0;
/// Initial horizontal speed; the swarm starts moving left.
pub const ALIEN_SPEED: f64 = 75.0;
/// Downward step applied on every swarm reversal.
pub const ALIEN_DROP: f64 = 10.0;
/// Every kill multiplies the surviving swarm's horizontal speed by this.
pub const ALIEN_SPEEDUP: f64 = 1.02;

// ── Shots ────────────────────────────────────────────────────────────────────

/// Negative: shots travel up.
pub const SHOT_SPEED: f64 = -300.0;
/// Shot spawn point relative to the ship's truncated position.
pub const SHOT_OFFSET: (i32, i32) = (10, -30);
/// Minimum session time between two accepted shots.
pub const FIRE_COOLDOWN_MS: u64 = 500;

// ── Loop ─────────────────────────────────────────────────────────────────────

/// Minimum pause at the end of every frame (≈100 FPS cap).
pub const FRAME_DELAY_MS: u64 = 10;

/// A key without a release event is still "held" this long after its last
/// press or auto-repeat.
pub const KEY_HOLD_WINDOW_MS: u64 = 150;

// ── Sprite references ────────────────────────────────────────────────────────

pub const SHIP_SPRITE: &str = "sprites/ship.gif";
pub const ALIEN_SPRITE: &str = "sprites/alien.gif";
pub const SHOT_SPRITE: &str = "sprites/shot.gif";

// ── Messages ─────────────────────────────────────────────────────────────────

pub const MSG_LOSE: &str = "Oh no! They got you, try again?";
pub const MSG_WIN: &str = "Well done! You Win!";
pub const MSG_PRESS_ANY_KEY: &str = "Press any key";
