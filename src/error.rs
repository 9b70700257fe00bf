use std::fmt;
use std::io;

use crate::sprite::SpriteError;

/// Everything that can stop the game.
#[derive(Debug)]
pub enum GameError {
    /// Terminal I/O failed.
    Io(io::Error),
    /// A sprite reference could not be resolved.
    Sprite(SpriteError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "terminal i/o failed: {e}"),
            GameError::Sprite(e) => write!(f, "asset error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Sprite(e) => Some(e),
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<SpriteError> for GameError {
    fn from(e: SpriteError) -> Self {
        GameError::Sprite(e)
    }
}
