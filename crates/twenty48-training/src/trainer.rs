use rand_pcg::Pcg64Mcg;
use twenty48_ai::{NetworkPlayer, Player as _};

use crate::population::{Population, PopulationParams};

/// Width of the one-sided confidence bound used for stage-3 pruning:
/// two standard errors below the elite's geometric-mean score.
const LCB_Z: f64 = 2.0;

/// Knobs for a training run. The defaults reproduce the canonical
/// micro-genetic setup.
#[derive(Debug, Clone, Copy)]
pub struct TrainerConfig {
    /// Total generations to run.
    pub generations: usize,
    /// Pool sizing and genome shape.
    pub params: PopulationParams,
    /// Games per player in the first (cheapest) evaluation stage.
    pub stage1_games: usize,
    /// Additional games for stage-1 survivors.
    pub stage2_games: usize,
    /// Deep-evaluation games for stage-2 survivors that pass the
    /// confidence gate.
    pub final_games: usize,
    /// Every this many generations, non-elite players are re-randomized
    /// to counter premature convergence.
    pub randomize_interval: usize,
    /// Cadence of the `checkpoint_due` flag in generation summaries.
    pub checkpoint_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            params: PopulationParams::default(),
            stage1_games: 20,
            stage2_games: 30,
            final_games: 250,
            randomize_interval: 30,
            checkpoint_interval: 10,
        }
    }
}

/// What one `advance()` call did, for driver-side reporting.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSummary {
    pub generation: u32,
    /// Whether this generation's non-elites were re-randomized.
    pub randomized: bool,
    /// Active players left after the stage-1 cut.
    pub stage1_survivors: usize,
    /// Active players left after the stage-2 cut.
    pub stage2_survivors: usize,
    /// The elite's lower-confidence-bound score gating stage 3, when an
    /// incumbent with history existed.
    pub final_threshold: Option<f64>,
    /// Geometric-mean score of this generation's best player.
    pub best_score: f64,
    /// Geometric-mean highest tile of this generation's best player.
    pub best_highest_tile: f64,
    /// Generation the best player was bred in.
    pub best_generation: u32,
    /// Whether the configured checkpoint cadence falls on this
    /// generation.
    pub checkpoint_due: bool,
}

/// The generational control loop.
///
/// One `advance()` call builds the next population and runs the staged,
/// cost-adaptive evaluation protocol over it. The driver owns the loop:
/// it stops, logs, and persists between calls, so a coarse
/// "stop after the current generation" needs no machinery here, and a
/// failed checkpoint write can never corrupt trainer state.
#[derive(Debug)]
pub struct MicroGeneticTrainer {
    config: TrainerConfig,
    rng: Pcg64Mcg,
    population: Option<Population>,
    completed: usize,
    best: Option<NetworkPlayer>,
}

impl MicroGeneticTrainer {
    /// Creates a trainer, optionally seeded with a restored population.
    #[must_use]
    pub fn new(config: TrainerConfig, seed_population: Option<Population>, rng: Pcg64Mcg) -> Self {
        Self {
            config,
            rng,
            population: seed_population,
            completed: 0,
            best: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Generations completed so far in this run.
    #[must_use]
    pub fn completed_generations(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed >= self.config.generations
    }

    #[must_use]
    pub fn population(&self) -> Option<&Population> {
        self.population.as_ref()
    }

    /// The best player seen so far across all completed generations,
    /// tracked monotonically by geometric-mean score.
    #[must_use]
    pub fn best_player(&self) -> Option<&NetworkPlayer> {
        self.best.as_ref()
    }

    /// Runs one full generation: construction, optional diversity
    /// reset, and the three evaluation stages.
    pub fn advance(&mut self) -> GenerationSummary {
        assert!(!self.is_finished(), "all configured generations have run");

        let mut population = match self.population.take() {
            Some(prior) => Population::next_generation(&prior, &mut self.rng),
            None => Population::random(self.config.params, &mut self.rng),
        };

        let randomized =
            self.completed > 0 && self.completed.is_multiple_of(self.config.randomize_interval);
        if randomized {
            population.randomize(&mut self.rng);
        }

        let pool_size = self.config.params.pool_size;

        // Stage 1: a cheap look at everyone, then keep the top half.
        population.play_games(self.config.stage1_games, false, 0.0, &mut self.rng);
        population
            .retain_top_active((pool_size / 2).saturating_sub(population.elites().len()));
        let stage1_survivors = population.players().len();

        // Stage 2: a closer look, then keep the top quarter.
        population.play_games(self.config.stage2_games, false, 0.0, &mut self.rng);
        population
            .retain_top_active((pool_size / 4).saturating_sub(population.elites().len()));
        let stage2_survivors = population.players().len();

        // Stage 3: the expensive evaluation. With an incumbent elite,
        // only survivors whose observed score beats the elite's lower
        // confidence bound are worth the spend; without one (or when a
        // restored elite has no history yet), everyone plays.
        let final_threshold = population
            .elites()
            .first()
            .and_then(|elite| elite.history().log_score_stats())
            .map(|stats| stats.lower_bound(LCB_Z));
        population.play_games(
            self.config.final_games,
            false,
            final_threshold.unwrap_or(0.0),
            &mut self.rng,
        );

        let best = population.sorted_players(true)[0].clone();
        if self
            .best
            .as_ref()
            .is_none_or(|incumbent| fitness_of(&best) > fitness_of(incumbent))
        {
            self.best = Some(best.clone());
        }

        let generation = population.generation();
        let checkpoint_due = self.config.checkpoint_interval > 0
            && (generation as usize).is_multiple_of(self.config.checkpoint_interval);

        self.population = Some(population);
        self.completed += 1;

        GenerationSummary {
            generation,
            randomized,
            stage1_survivors,
            stage2_survivors,
            final_threshold,
            best_score: best.history().geometric_mean_score(),
            best_highest_tile: best.history().geometric_mean_highest_tile(),
            best_generation: best.generation(),
            checkpoint_due,
        }
    }
}

fn fitness_of(player: &NetworkPlayer) -> f64 {
    let score = player.history().geometric_mean_score();
    if score.is_nan() { f64::NEG_INFINITY } else { score }
}
