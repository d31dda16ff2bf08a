use rand::RngCore;
use twenty48_engine::{Action, Game};

use crate::{history::GameHistory, player::Player};

/// Plays the move that maximizes the score one ply ahead.
///
/// Ties go to the first candidate in legal-move order.
#[derive(Debug, Clone, Default)]
pub struct GreedyPlayer {
    history: GameHistory,
}

impl GreedyPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for GreedyPlayer {
    fn choose_action(&mut self, game: &Game, _rng: &mut dyn RngCore) -> Action {
        let mut best: Option<(Action, u32)> = None;
        for direction in game.legal_moves() {
            let (_, points) = game
                .simulate_move(direction)
                .expect("legal moves simulate successfully");
            let resulting_score = game.score() + points;
            if best.is_none_or(|(_, score)| resulting_score > score) {
                best = Some((direction, resulting_score));
            }
        }
        best.expect("an unfinished game always has a legal move").0
    }

    fn history(&self) -> &GameHistory {
        &self.history
    }

    fn history_mut(&mut self) -> &mut GameHistory {
        &mut self.history
    }
}
