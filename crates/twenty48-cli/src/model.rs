use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twenty48_ai::{Genome, GenomeLayout};

use crate::util;

/// The exported result of a training run: the best genome found,
/// together with how it earned that rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChampionModel {
    pub trained_at: DateTime<Utc>,
    pub generation: u32,
    pub games_played: usize,
    pub geometric_mean_score: f64,
    pub geometric_mean_highest_tile: f64,
    pub layout: GenomeLayout,
    pub genome: Genome,
}

impl ChampionModel {
    pub(crate) fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("champion model", path)
    }
}
