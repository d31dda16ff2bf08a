//! Micro-genetic training for 2048 network policies.
//!
//! This crate implements the evolutionary loop that turns random
//! [`twenty48_ai::Genome`]s into competent players:
//!
//! 1. **Population** — a pool of network players with elite carry-over,
//!    uniform distinct-parent breeding, and a mean-pairwise-similarity
//!    diversity metric.
//! 2. **Staged evaluation** — every generation spends simulated games in
//!    increasing amounts on a shrinking set of candidates (successive
//!    halving), and gates the most expensive stage on a
//!    lower-confidence-bound comparison against the incumbent elite.
//! 3. **Trainer** — a step-driven control loop: one `advance()` call runs
//!    one full generation and reports a summary; the driver decides when
//!    to stop, log, and checkpoint.
//!
//! # Evaluation cost model
//!
//! Playing games is by far the dominant cost, so the trainer prunes
//! aggressively: after a cheap first look (20 games each) only the top
//! half of the pool survives, after a second look (30 more games) only
//! the top quarter, and the 250-game deep evaluation runs only for
//! survivors whose observed geometric-mean score is within statistical
//! reach of the elite's lower confidence bound.
//!
//! # Reproducibility
//!
//! The trainer owns a single seedable generator; per-player game
//! evaluation fans out over scoped threads with one derived
//! `Pcg64Mcg` seed per player, so a fixed top-level seed reproduces a
//! whole run regardless of thread scheduling.

pub use self::{
    population::{Population, PopulationConfigError, PopulationParams},
    snapshot::{GenomeRecord, PopulationSnapshot},
    trainer::{GenerationSummary, MicroGeneticTrainer, TrainerConfig},
};

pub mod population;
pub mod snapshot;
pub mod trainer;
