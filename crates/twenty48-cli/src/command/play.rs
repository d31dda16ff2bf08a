use twenty48_ai::{ManualPlayer, Player as _};

use crate::{
    terminal::{KeyboardSource, RawModeGuard, TerminalDisplay},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for tile spawning; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let mut rng = util::rng_from_seed(arg.seed);
    let mut player = ManualPlayer::new(Box::new(KeyboardSource));

    {
        let _guard = RawModeGuard::enable()?;
        let mut display = TerminalDisplay::new();
        player.play_game(&mut rng, Some(&mut display))?;
    }

    let history = player.history();
    println!(
        "Final score {} with highest tile {}.",
        history.scores()[0],
        history.highest_tiles()[0]
    );
    Ok(())
}
