use std::thread;

use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64Mcg;
use twenty48_ai::{GenomeLayout, NetworkPlayer, Player as _};

use crate::snapshot::{GenomeRecord, PopulationSnapshot};

/// Explicit sizing for a population built from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationParams {
    /// Total pool size: active players plus elite slots.
    pub pool_size: usize,
    /// Number of top players carried into the next generation unchanged.
    pub elite_count: usize,
    /// Shape of every genome in the pool.
    pub layout: GenomeLayout,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            pool_size: 32,
            elite_count: 1,
            layout: GenomeLayout::default(),
        }
    }
}

/// Asked to build a population with neither explicit parameters nor a
/// prior population to inherit from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("population construction needs explicit parameters or a prior population")]
pub struct PopulationConfigError;

/// One generation's pool of network players.
///
/// The pool splits into the active players being evaluated this
/// generation and the elites carried over from the previous one.
/// Elites are value copies — cloned snapshots that keep their
/// accumulated game history but share no state with the prior
/// generation's instances.
#[derive(Debug, Clone)]
pub struct Population {
    generation: u32,
    params: PopulationParams,
    players: Vec<NetworkPlayer>,
    elites: Vec<NetworkPlayer>,
    similarity: f64,
}

impl Population {
    /// Builds a population from explicit parameters or from a prior
    /// population, whichever is supplied; the prior wins when both are.
    ///
    /// # Errors
    ///
    /// [`PopulationConfigError`] when neither is supplied — the request
    /// is ambiguous and fails fast.
    pub fn new<R>(
        params: Option<PopulationParams>,
        prior: Option<&Population>,
        rng: &mut R,
    ) -> Result<Self, PopulationConfigError>
    where
        R: Rng + ?Sized,
    {
        match (prior, params) {
            (Some(prior), _) => Ok(Self::next_generation(prior, rng)),
            (None, Some(params)) => Ok(Self::random(params, rng)),
            (None, None) => Err(PopulationConfigError),
        }
    }

    /// Generation 1: a full pool of random players and no elites.
    pub fn random<R>(params: PopulationParams, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(
            params.pool_size >= 2 && params.elite_count < params.pool_size,
            "pool must hold at least two players and leave room beyond the elites"
        );
        let players = (0..params.pool_size)
            .map(|_| NetworkPlayer::random(1, params.layout, rng))
            .collect();
        let mut population = Self {
            generation: 1,
            params,
            players,
            elites: Vec::new(),
            similarity: f64::NAN,
        };
        population.refresh_similarity();
        population
    }

    /// Breeds the next generation from `prior`.
    ///
    /// The elites are the top players of the prior combined pool,
    /// cloned with their histories; the remaining slots are children of
    /// two distinct parents sampled uniformly from that same pool.
    pub fn next_generation<R>(prior: &Population, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let generation = prior.generation + 1;
        let parents = prior.sorted_players(true);
        let elites: Vec<NetworkPlayer> = parents
            .iter()
            .take(prior.params.elite_count)
            .map(|player| (*player).clone())
            .collect();
        let players = (0..prior.params.pool_size - elites.len())
            .map(|_| {
                let pair: Vec<&NetworkPlayer> =
                    parents.choose_multiple(rng, 2).copied().collect();
                match pair.as_slice() {
                    [mom, dad] => NetworkPlayer::offspring(generation, mom, dad, rng),
                    // A pool pruned down to a single player cannot supply
                    // two distinct parents; fresh genomes fill the gap.
                    _ => NetworkPlayer::random(generation, prior.params.layout, rng),
                }
            })
            .collect();
        let mut population = Self {
            generation,
            params: prior.params,
            players,
            elites,
            similarity: f64::NAN,
        };
        population.refresh_similarity();
        population
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn params(&self) -> PopulationParams {
        self.params
    }

    #[must_use]
    pub fn players(&self) -> &[NetworkPlayer] {
        &self.players
    }

    #[must_use]
    pub fn elites(&self) -> &[NetworkPlayer] {
        &self.elites
    }

    /// Mean pairwise genome similarity over the whole pool. Purely
    /// observational; NaN when the pool holds fewer than two players.
    #[must_use]
    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    /// Replaces every active player with a fresh random one, leaving
    /// the elites untouched. A diversity-restoring reset.
    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let layout = self.params.layout;
        let generation = self.generation;
        for player in &mut self.players {
            *player = NetworkPlayer::random(generation, layout, rng);
        }
        self.refresh_similarity();
    }

    /// Every eligible player plays `count` more games, appending to its
    /// running history.
    ///
    /// Elites are excluded unless `include_elites`; players that already
    /// have a fitness estimate at or below `threshold` are skipped
    /// (pass 0.0 to evaluate everyone). Games run in parallel, one
    /// scoped thread and one derived RNG seed per player, so results
    /// are reproducible given the caller's RNG state.
    pub fn play_games<R>(&mut self, count: usize, include_elites: bool, threshold: f64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let elite_slots = if include_elites { self.elites.len() } else { 0 };
        let eligible: Vec<&mut NetworkPlayer> = self
            .players
            .iter_mut()
            .chain(self.elites.iter_mut().take(elite_slots))
            .filter(|player| {
                let history = player.history();
                history.is_empty() || history.geometric_mean_score() > threshold
            })
            .collect();
        let seeds: Vec<u64> = (0..eligible.len()).map(|_| rng.next_u64()).collect();

        thread::scope(|scope| {
            for (player, seed) in eligible.into_iter().zip(seeds) {
                scope.spawn(move || {
                    let mut game_rng = Pcg64Mcg::seed_from_u64(seed);
                    player
                        .play_multiple_games(count, &mut game_rng)
                        .expect("network players play unattended games");
                });
            }
        });
    }

    /// The pool sorted by geometric-mean score, best first.
    ///
    /// The sort is stable, so ties (and players with no games, which
    /// sort last) keep their current relative order — results are
    /// reproducible given a fixed seed.
    #[must_use]
    pub fn sorted_players(&self, include_elites: bool) -> Vec<&NetworkPlayer> {
        let elite_slots = if include_elites { self.elites.len() } else { 0 };
        let mut players: Vec<&NetworkPlayer> = self
            .players
            .iter()
            .chain(self.elites.iter().take(elite_slots))
            .collect();
        players.sort_by(|a, b| fitness_key(b).total_cmp(&fitness_key(a)));
        players
    }

    /// Sorts the active players by fitness and keeps the top `keep`.
    pub fn retain_top_active(&mut self, keep: usize) {
        self.players
            .sort_by(|a, b| fitness_key(b).total_cmp(&fitness_key(a)));
        self.players.truncate(keep);
        self.refresh_similarity();
    }

    /// Captures the persistence view of this population.
    #[must_use]
    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot {
            generation: self.generation,
            pool_size: self.params.pool_size,
            elite_count: self.params.elite_count,
            layout: self.params.layout,
            similarity: self.similarity,
            elites: self.elites.iter().map(GenomeRecord::of).collect(),
            active: self.players.iter().map(GenomeRecord::of).collect(),
        }
    }

    /// Rebuilds a population from a snapshot.
    ///
    /// Game histories do not survive the round trip; downstream logic
    /// tolerates elites without history by skipping confidence-bound
    /// pruning until they have played again.
    #[must_use]
    pub fn from_snapshot(snapshot: &PopulationSnapshot) -> Self {
        let restore = |record: &GenomeRecord| {
            NetworkPlayer::from_genome(record.generation, record.genome.clone())
        };
        Self {
            generation: snapshot.generation,
            params: PopulationParams {
                pool_size: snapshot.pool_size,
                elite_count: snapshot.elite_count,
                layout: snapshot.layout,
            },
            players: snapshot.active.iter().map(restore).collect(),
            elites: snapshot.elites.iter().map(restore).collect(),
            similarity: snapshot.similarity,
        }
    }

    fn refresh_similarity(&mut self) {
        let pool: Vec<&NetworkPlayer> = self.players.iter().chain(&self.elites).collect();
        let mut sum = 0.0;
        let mut pairs: usize = 0;
        for (i, first) in pool.iter().enumerate() {
            for &second in &pool[i + 1..] {
                sum += first.similarity(second);
                pairs += 1;
            }
        }
        #[expect(clippy::cast_precision_loss)]
        let similarity = if pairs == 0 { f64::NAN } else { sum / pairs as f64 };
        self.similarity = similarity;
    }
}

/// Sort key treating "no games played" (NaN) as worst.
fn fitness_key(player: &NetworkPlayer) -> f64 {
    let score = player.history().geometric_mean_score();
    if score.is_nan() { f64::NEG_INFINITY } else { score }
}
