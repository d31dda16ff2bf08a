use std::{collections::BTreeMap, path::PathBuf};

use twenty48_ai::{
    GameHistory, GenomeLayout, GreedyPlayer, NetworkPlayer, OrderedPlayer, Player, RandomPlayer,
};

use crate::{model::ChampionModel, util};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum PlayerKind {
    Greedy,
    #[default]
    Random,
    Ordered,
    Network,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BenchArg {
    /// Which policy to benchmark
    #[arg(long, default_value = "random")]
    player: PlayerKind,
    /// Number of unattended games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Seed for reproducible results; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Champion model for the network player; random weights if omitted
    #[arg(long)]
    model: Option<PathBuf>,
}

pub(crate) fn run(arg: &BenchArg) -> anyhow::Result<()> {
    let mut rng = util::rng_from_seed(arg.seed);

    let mut player: Box<dyn Player> = match arg.player {
        PlayerKind::Greedy => Box::new(GreedyPlayer::new()),
        PlayerKind::Random => Box::new(RandomPlayer::new()),
        PlayerKind::Ordered => Box::new(OrderedPlayer::new()),
        PlayerKind::Network => match &arg.model {
            Some(path) => {
                let model = ChampionModel::open(path)?;
                eprintln!(
                    "Loaded champion from generation {} (trained {}).",
                    model.generation, model.trained_at
                );
                Box::new(NetworkPlayer::from_genome(model.generation, model.genome))
            }
            None => {
                eprintln!("No model given; benchmarking an untrained network.");
                Box::new(NetworkPlayer::random(0, GenomeLayout::default(), &mut rng))
            }
        },
    };

    eprintln!("Playing {} games...", arg.games);
    player.play_multiple_games(arg.games, &mut rng)?;
    print_summary(player.history());
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn print_summary(history: &GameHistory) {
    let mut tile_counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &tile in history.highest_tiles() {
        *tile_counts.entry(tile).or_insert(0) += 1;
    }

    let games = history.games_played();
    println!("Highest Tile Achieved");
    for (tile, count) in tile_counts {
        println!("{tile}\t{:.1}%", 100.0 * count as f64 / games as f64);
    }
    println!(
        "Average Tile  = {:.0}",
        history.geometric_mean_highest_tile()
    );
    println!("Average Score = {:.0}", history.geometric_mean_score());
    println!("Games Played  = {games}");
}
