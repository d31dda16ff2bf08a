//! The policy interface and its variants.
//!
//! A [`Player`] chooses actions for a running [`Game`] and accumulates
//! per-game results in a [`GameHistory`]. The provided `play_game` /
//! `play_multiple_games` drive a full game against a fresh engine
//! instance; display and input are abstract capabilities
//! ([`GameObserver`], [`ActionSource`]) so the core never touches a
//! terminal.

use rand::RngCore;
use twenty48_engine::{Action, Game};

use crate::history::GameHistory;

pub use self::{
    greedy::GreedyPlayer, manual::ManualPlayer, network::NetworkPlayer, ordered::OrderedPlayer,
    random::RandomPlayer,
};

mod greedy;
mod manual;
mod network;
mod ordered;
mod random;

/// Misuse of a player that is rejected deterministically and early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayError {
    /// A manual game was requested without a display to show it on.
    #[display("a display is required to play a manual game")]
    DisplayRequired,
    /// Unattended batch play was requested from an interactive player.
    #[display("manual players cannot play unattended games")]
    UnattendedManualPlay,
}

/// Display capability: receives every state of a running game.
pub trait GameObserver {
    /// Called with the initial state and after every applied move.
    fn frame(&mut self, game: &Game);

    /// Called once when the game ends (game over or quit).
    fn finished(&mut self, game: &Game) {
        let _ = game;
    }
}

/// Input capability for interactive play.
pub trait ActionSource {
    fn next_action(&mut self) -> Action;
}

/// A policy that plays 2048 and tracks its results.
pub trait Player {
    /// Chooses the next action for `game`. Implementations only return
    /// moves that are currently legal (interactive players may also
    /// return [`Action::Quit`]).
    fn choose_action(&mut self, game: &Game, rng: &mut dyn RngCore) -> Action;

    fn history(&self) -> &GameHistory;

    fn history_mut(&mut self) -> &mut GameHistory;

    /// Plays one full game against a fresh engine instance and appends
    /// the final score and highest tile to this player's history.
    fn play_game(
        &mut self,
        rng: &mut dyn RngCore,
        observer: Option<&mut dyn GameObserver>,
    ) -> Result<(), PlayError> {
        run_game(self, rng, observer);
        Ok(())
    }

    /// Plays `count` games without a display.
    fn play_multiple_games(&mut self, count: usize, rng: &mut dyn RngCore) -> Result<(), PlayError> {
        for _ in 0..count {
            self.play_game(rng, None)?;
        }
        Ok(())
    }
}

/// The shared game loop behind [`Player::play_game`].
fn run_game<P>(player: &mut P, rng: &mut dyn RngCore, mut observer: Option<&mut dyn GameObserver>)
where
    P: Player + ?Sized,
{
    let mut game = Game::new(rng);
    if let Some(observer) = observer.as_mut() {
        observer.frame(&game);
    }
    while !game.is_game_over() {
        let action = player.choose_action(&game, rng);
        if action == Action::Quit {
            break;
        }
        game.apply_move(action, rng);
        if let Some(observer) = observer.as_mut() {
            observer.frame(&game);
        }
    }
    if let Some(observer) = observer.as_mut() {
        observer.finished(&game);
    }
    player.history_mut().record(game.score(), game.highest_tile());
}
