use crate::game::Direction;

/// Non-blocking source of player intents, polled once per tick
pub trait InputSource {
    /// Most recent direction request since the last poll, if any
    fn poll_direction(&mut self) -> Option<Direction>;

    /// Whether the player asked to leave
    fn poll_quit(&mut self) -> bool;
}

/// Single-slot intent buffer filled by key events and drained by ticks.
///
/// A new direction overwrites the previous one, so only the latest key
/// pressed within a tick is honoured. Quit is latched until polled.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputSlot {
    direction: Option<Direction>,
    quit: bool,
}

impl InputSlot {
    /// Empty slot: no direction pending, no quit requested
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a direction, replacing any not yet polled
    pub fn push_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// Latch a quit request until the next `poll_quit`
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Drop any pending direction and quit request
    pub fn clear(&mut self) {
        self.direction = None;
        self.quit = false;
    }

    /// Whether a quit is latched, without consuming it
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl InputSource for InputSlot {
    fn poll_direction(&mut self) -> Option<Direction> {
        self.direction.take()
    }

    fn poll_quit(&mut self) -> bool {
        std::mem::take(&mut self.quit)
    }
}
