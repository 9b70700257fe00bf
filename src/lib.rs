//! Space Invaders in the terminal.
//!
//! - `clock`: frame deltas from the wall clock
//! - `entities`: ship, aliens and shots with their movement / collision rules
//! - `world`: live entity set with deferred removal
//! - `session`: round state machine and the per-frame passes
//! - `input`: held-key tracking
//! - `sprite`: sprite assets and their cache
//! - `display`: canvas trait and the crossterm renderer

pub mod clock;
pub mod consts;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod session;
pub mod sprite;
pub mod world;

pub use error::GameError;
pub use session::{Control, Outcome, RoundState, Session};
