use std::{fs, path::PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use twenty48_ai::{GenomeLayout, Player as _};
use twenty48_training::{
    MicroGeneticTrainer, Population, PopulationParams, PopulationSnapshot, TrainerConfig,
};

use crate::{model::ChampionModel, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Total number of generations to run
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Players per generation, elites included
    #[arg(long, default_value_t = 32)]
    pool_size: usize,
    /// Top players carried over unchanged each generation
    #[arg(long, default_value_t = 1)]
    elite_count: usize,
    /// Write a population checkpoint every this many generations
    #[arg(long, default_value_t = 10)]
    checkpoint_interval: usize,
    /// Seed for a reproducible run; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Population checkpoint to resume from
    #[arg(long)]
    resume: Option<PathBuf>,
    /// Directory for population checkpoints
    #[arg(long, default_value = "checkpoints")]
    checkpoint_dir: PathBuf,
    /// Where to write the trained champion model
    #[arg(long, default_value = "champion.json")]
    output: PathBuf,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let rng = util::rng_from_seed(arg.seed);

    let seed_population = arg
        .resume
        .as_ref()
        .map(|path| -> anyhow::Result<Population> {
            let snapshot: PopulationSnapshot = util::read_json_file("population checkpoint", path)?;
            eprintln!(
                "Resuming from generation {} ({} elites, {} active).",
                snapshot.generation,
                snapshot.elites.len(),
                snapshot.active.len()
            );
            Ok(Population::from_snapshot(&snapshot))
        })
        .transpose()?;

    let config = TrainerConfig {
        generations: arg.generations,
        params: PopulationParams {
            pool_size: arg.pool_size,
            elite_count: arg.elite_count,
            layout: GenomeLayout::default(),
        },
        checkpoint_interval: arg.checkpoint_interval,
        ..TrainerConfig::default()
    };

    fs::create_dir_all(&arg.checkpoint_dir).with_context(|| {
        format!(
            "Failed to create checkpoint directory: {}",
            arg.checkpoint_dir.display()
        )
    })?;

    let mut trainer = MicroGeneticTrainer::new(config, seed_population, rng);
    while !trainer.is_finished() {
        let summary = trainer.advance();
        eprintln!(
            "Generation #{} ({} of {}):",
            summary.generation,
            trainer.completed_generations(),
            arg.generations
        );
        if summary.randomized {
            eprintln!("  randomized non-elite players to restore diversity");
        }
        eprintln!(
            "  survivors: {} after stage 1, {} after stage 2",
            summary.stage1_survivors, summary.stage2_survivors
        );
        match summary.final_threshold {
            Some(threshold) => {
                eprintln!("  deep evaluation for scores above {threshold:.0}");
            }
            None => eprintln!("  deep evaluation for all survivors (no incumbent)"),
        }
        eprintln!(
            "  best: score {:.0}, highest tile {:.0} (bred in generation {})",
            summary.best_score, summary.best_highest_tile, summary.best_generation
        );
        let population = trainer
            .population()
            .expect("an advanced trainer holds a population");
        eprintln!("  pool similarity: {:.3}", population.similarity());

        if summary.checkpoint_due {
            let path = checkpoint_path(&arg.checkpoint_dir, summary.generation);
            util::save_json(&population.snapshot(), &path)?;
            eprintln!("  checkpoint written to {}", path.display());
        }
    }

    if let Some(population) = trainer.population() {
        let path = checkpoint_path(&arg.checkpoint_dir, population.generation());
        util::save_json(&population.snapshot(), &path)?;
        eprintln!("Final checkpoint written to {}", path.display());
    }

    let best = trainer
        .best_player()
        .context("no generations were run, nothing to export")?;
    let model = ChampionModel {
        trained_at: Utc::now(),
        generation: best.generation(),
        games_played: best.history().games_played(),
        geometric_mean_score: best.history().geometric_mean_score(),
        geometric_mean_highest_tile: best.history().geometric_mean_highest_tile(),
        layout: best.genome().layout(),
        genome: best.genome().clone(),
    };
    util::save_json(&model, &arg.output)?;

    eprintln!();
    eprintln!("Champion saved to {}", arg.output.display());
    eprintln!("  Generation: {}", model.generation);
    eprintln!("  Score: {:.0}", model.geometric_mean_score);
    eprintln!("  Highest tile: {:.0}", model.geometric_mean_highest_tile);
    eprintln!("  Games played: {}", model.games_played);
    Ok(())
}

fn checkpoint_path(dir: &std::path::Path, generation: u32) -> PathBuf {
    dir.join(format!("generation-{generation}.json"))
}
