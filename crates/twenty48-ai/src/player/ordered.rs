use rand::RngCore;
use twenty48_engine::{Action, Game};

use crate::{history::GameHistory, player::Player};

/// A fixed heuristic that herds tiles into the bottom-right corner.
///
/// Prefers Down unless Down was the immediately preceding move, then
/// Right, then whatever is legal first.
#[derive(Debug, Clone, Default)]
pub struct OrderedPlayer {
    previous_action: Option<Action>,
    history: GameHistory,
}

impl OrderedPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for OrderedPlayer {
    fn choose_action(&mut self, game: &Game, _rng: &mut dyn RngCore) -> Action {
        let legal = game.legal_moves();
        let action = if self.previous_action != Some(Action::Down)
            && legal.contains(&Action::Down)
        {
            Action::Down
        } else if legal.contains(&Action::Right) {
            Action::Right
        } else {
            legal[0]
        };
        self.previous_action = Some(action);
        action
    }

    fn history(&self) -> &GameHistory {
        &self.history
    }

    fn history_mut(&mut self) -> &mut GameHistory {
        &mut self.history
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use twenty48_engine::Board;

    use super::*;

    #[test]
    fn first_move_is_down() {
        let mut rng = Pcg64Mcg::seed_from_u64(51);
        let game = Game::from_board(Board::from_exponents([
            [0, 0, 0, 0],
            [0, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]));
        let mut player = OrderedPlayer::new();
        assert_eq!(player.choose_action(&game, &mut rng), Action::Down);
    }

    #[test]
    fn right_when_down_is_illegal() {
        let mut rng = Pcg64Mcg::seed_from_u64(52);
        let game = Game::from_board(Board::from_exponents([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 1, 1, 0],
        ]));
        let mut player = OrderedPlayer::new();
        assert_eq!(player.choose_action(&game, &mut rng), Action::Right);
    }

    #[test]
    fn alternates_away_from_repeated_down() {
        let mut rng = Pcg64Mcg::seed_from_u64(53);
        let game = Game::from_board(Board::from_exponents([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 1, 1, 0],
            [0, 0, 0, 0],
        ]));
        let mut player = OrderedPlayer::new();
        player.previous_action = Some(Action::Down);
        assert_eq!(player.choose_action(&game, &mut rng), Action::Right);
    }

    #[test]
    fn plays_multiple_games() {
        let mut rng = Pcg64Mcg::seed_from_u64(54);
        let mut player = OrderedPlayer::new();
        player.play_multiple_games(3, &mut rng).unwrap();
        assert_eq!(player.history().games_played(), 3);
    }
}
