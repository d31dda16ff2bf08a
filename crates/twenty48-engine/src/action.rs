/// A player action: one of the four slide directions, or quitting the game.
///
/// Quitting is only meaningful to interactive players; the engine itself
/// treats it like any other non-direction input (a no-op).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Action {
    #[display("LEFT")]
    Left,
    #[display("RIGHT")]
    Right,
    #[display("UP")]
    Up,
    #[display("DOWN")]
    Down,
    #[display("QUIT")]
    Quit,
}

/// The four slide directions in their canonical order.
///
/// This order is load-bearing: move rankings break ties by it, and
/// [`Game::legal_moves`](crate::Game::legal_moves) reports moves in it.
pub const DIRECTIONS: [Action; 4] = [Action::Left, Action::Right, Action::Up, Action::Down];

impl Action {
    /// Number of counterclockwise quarter turns that align this direction
    /// with "leftward". `None` for [`Action::Quit`].
    #[must_use]
    pub fn quarter_turns(self) -> Option<usize> {
        match self {
            Action::Left => Some(0),
            Action::Up => Some(1),
            Action::Right => Some(2),
            Action::Down => Some(3),
            Action::Quit => None,
        }
    }

    /// Whether this action is one of the four slide directions.
    #[must_use]
    pub fn is_direction(self) -> bool {
        self.quarter_turns().is_some()
    }
}
