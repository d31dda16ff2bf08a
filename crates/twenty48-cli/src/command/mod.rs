use clap::{Parser, Subcommand};

mod bench;
mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game yourself in the terminal
    Play(play::PlayArg),
    /// Evolve network players with the micro-genetic algorithm
    Train(train::TrainArg),
    /// Benchmark a policy over many unattended games
    Bench(bench::BenchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(play::PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg),
        Mode::Train(arg) => train::run(&arg),
        Mode::Bench(arg) => bench::run(&arg),
    }
}
