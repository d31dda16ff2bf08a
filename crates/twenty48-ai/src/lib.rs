//! Policies for playing 2048, and the genome they evolve from.
//!
//! This crate sits between the game engine and the training system:
//!
//! - [`Genome`] holds the ternary weights of a small feed-forward
//!   network together with its reproduction rules (row-granular
//!   crossover, per-weight mutation) and a similarity measure.
//! - [`Player`] is the policy interface: choose an action for the
//!   current game state, and accumulate per-game results into a
//!   [`GameHistory`] whose geometric means are the fitness signal the
//!   trainer consumes.
//! - The variants cover the evolved network plus the fixed baselines
//!   (greedy one-ply search, uniform random, a down-right heuristic)
//!   and interactive manual play.

pub use self::{
    genome::{Genome, GenomeLayout},
    history::GameHistory,
    player::{
        ActionSource, GameObserver, GreedyPlayer, ManualPlayer, NetworkPlayer, OrderedPlayer,
        PlayError, Player, RandomPlayer,
    },
};

pub mod genome;
pub mod history;
pub mod player;
