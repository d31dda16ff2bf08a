use rand::RngCore;
use twenty48_engine::{Action, Game};

use crate::{
    history::GameHistory,
    player::{ActionSource, GameObserver, PlayError, Player, run_game},
};

/// An interactive player fed by an external [`ActionSource`].
///
/// Manual play needs a display: `play_game` without an observer and
/// unattended `play_multiple_games` are usage errors, rejected before
/// any game state is created.
pub struct ManualPlayer {
    source: Box<dyn ActionSource>,
    history: GameHistory,
}

impl ManualPlayer {
    #[must_use]
    pub fn new(source: Box<dyn ActionSource>) -> Self {
        Self {
            source,
            history: GameHistory::new(),
        }
    }
}

impl Player for ManualPlayer {
    fn choose_action(&mut self, _game: &Game, _rng: &mut dyn RngCore) -> Action {
        self.source.next_action()
    }

    fn play_game(
        &mut self,
        rng: &mut dyn RngCore,
        observer: Option<&mut dyn GameObserver>,
    ) -> Result<(), PlayError> {
        let Some(observer) = observer else {
            return Err(PlayError::DisplayRequired);
        };
        run_game(self, rng, Some(observer));
        Ok(())
    }

    fn play_multiple_games(
        &mut self,
        _count: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<(), PlayError> {
        Err(PlayError::UnattendedManualPlay)
    }

    fn history(&self) -> &GameHistory {
        &self.history
    }

    fn history_mut(&mut self) -> &mut GameHistory {
        &mut self.history
    }
}
