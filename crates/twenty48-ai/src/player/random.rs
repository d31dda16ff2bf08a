use rand::{RngCore, seq::IndexedRandom as _};
use twenty48_engine::{Action, Game};

use crate::{history::GameHistory, player::Player};

/// Plays a uniformly random legal move. The weakest baseline.
#[derive(Debug, Clone, Default)]
pub struct RandomPlayer {
    history: GameHistory,
}

impl RandomPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for RandomPlayer {
    fn choose_action(&mut self, game: &Game, rng: &mut dyn RngCore) -> Action {
        *game
            .legal_moves()
            .choose(rng)
            .expect("an unfinished game always has a legal move")
    }

    fn history(&self) -> &GameHistory {
        &self.history
    }

    fn history_mut(&mut self) -> &mut GameHistory {
        &mut self.history
    }
}
