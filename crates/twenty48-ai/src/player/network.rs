use rand::{Rng, RngCore};
use twenty48_engine::{Action, Game};

use crate::{
    genome::{Genome, GenomeLayout},
    history::GameHistory,
    player::Player,
};

/// A policy driven by an evolved [`Genome`].
///
/// The genome ranks all four directions for the current board; the
/// player takes the best-ranked move that is currently legal.
#[derive(Debug, Clone)]
pub struct NetworkPlayer {
    generation: u32,
    genome: Genome,
    history: GameHistory,
}

impl NetworkPlayer {
    /// Wraps an existing genome.
    #[must_use]
    pub fn from_genome(generation: u32, genome: Genome) -> Self {
        Self {
            generation,
            genome,
            history: GameHistory::new(),
        }
    }

    /// Creates a player with a freshly random genome.
    pub fn random<R>(generation: u32, layout: GenomeLayout, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_genome(generation, Genome::random(layout, rng))
    }

    /// Breeds a child player from two parents.
    pub fn offspring<R>(
        generation: u32,
        mom: &NetworkPlayer,
        dad: &NetworkPlayer,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let genome = Genome::from_parents(
            mom.genome.layout(),
            Some(&mom.genome),
            Some(&dad.genome),
            rng,
        );
        Self::from_genome(generation, genome)
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Genome similarity to another network player.
    #[must_use]
    pub fn similarity(&self, other: &NetworkPlayer) -> f64 {
        self.genome.similarity(&other.genome)
    }
}

impl Player for NetworkPlayer {
    fn choose_action(&mut self, game: &Game, _rng: &mut dyn RngCore) -> Action {
        let legal = game.legal_moves();
        self.genome
            .move_order(game.board())
            .into_iter()
            .find(|direction| legal.contains(direction))
            .expect("an unfinished game always has a legal move")
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

    fn layout() -> GenomeLayout {
        GenomeLayout {
            hidden_size: 16,
            hidden_layers: 1,
        }
    }

    #[test]
    fn similarity_is_reflexive() {
        let mut rng = Pcg64Mcg::seed_from_u64(21);
        let player = NetworkPlayer::random(1, layout(), &mut rng);
        assert!((player.similarity(&player) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn child_resembles_both_parents() {
        let mut rng = Pcg64Mcg::seed_from_u64(22);
        let mom = NetworkPlayer::random(1, layout(), &mut rng);
        let dad = NetworkPlayer::random(1, layout(), &mut rng);
        let child = NetworkPlayer::offspring(2, &mom, &dad, &mut rng);
        assert!(child.similarity(&mom) > 0.2);
        assert!(child.similarity(&dad) > 0.2);
        assert_eq!(child.generation(), 2);
    }

    #[test]
    fn chooses_a_legal_move() {
        let mut rng = Pcg64Mcg::seed_from_u64(23);
        let mut player = NetworkPlayer::random(1, layout(), &mut rng);
        let game = Game::from_board(Board::from_exponents([
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 1, 0],
        ]));
        let action = player.choose_action(&game, &mut rng);
        assert!(game.legal_moves().contains(&action));
    }

    #[test]
    fn plays_multiple_games() {
        let mut rng = Pcg64Mcg::seed_from_u64(24);
        let mut player = NetworkPlayer::random(1, layout(), &mut rng);
        player.play_multiple_games(3, &mut rng).unwrap();
        assert_eq!(player.history().games_played(), 3);
    }
}
