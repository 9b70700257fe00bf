/// Wall-clock to frame-delta conversion for the game loop.
///
/// Deltas are whole milliseconds.  The clock only advances its reference
/// instant by the milliseconds it handed out, so the sub-millisecond rest of
/// each frame is carried into the next one instead of being dropped.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        FrameClock { last: start }
    }

    /// Whole milliseconds since the previous tick.
    pub fn tick(&mut self) -> u64 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> u64 {
        let delta = now.saturating_duration_since(self.last).as_millis() as u64;
        self.last += Duration::from_millis(delta);
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
