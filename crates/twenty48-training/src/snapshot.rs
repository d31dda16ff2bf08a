use serde::{Deserialize, Serialize};
use twenty48_ai::{Genome, GenomeLayout, NetworkPlayer};

/// A genome plus the generation it was bred in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeRecord {
    pub generation: u32,
    pub genome: Genome,
}

impl GenomeRecord {
    pub(crate) fn of(player: &NetworkPlayer) -> Self {
        Self {
            generation: player.generation(),
            genome: player.genome().clone(),
        }
    }
}

/// The persistence view of a [`Population`](crate::Population).
///
/// Round-trip contract: restoring a saved snapshot reproduces identical
/// weight arrays and the identical generation counter for every genome.
/// Per-game run histories are deliberately not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub generation: u32,
    pub pool_size: usize,
    pub elite_count: usize,
    pub layout: GenomeLayout,
    pub similarity: f64,
    pub elites: Vec<GenomeRecord>,
    pub active: Vec<GenomeRecord>,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use twenty48_ai::{GenomeLayout, Player as _};

    use super::PopulationSnapshot;
    use crate::population::{Population, PopulationParams};

    fn params() -> PopulationParams {
        PopulationParams {
            pool_size: 4,
            elite_count: 1,
            layout: GenomeLayout {
                hidden_size: 8,
                hidden_layers: 1,
            },
        }
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut rng = Pcg64Mcg::seed_from_u64(71);
        let first = Population::random(params(), &mut rng);
        let mut second = Population::next_generation(&first, &mut rng);
        second.play_games(1, false, 0.0, &mut rng);

        let snapshot = second.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored_snapshot: PopulationSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, restored_snapshot);

        let restored = Population::from_snapshot(&restored_snapshot);
        assert_eq!(restored.generation(), second.generation());
        assert_eq!(restored.params(), second.params());
        assert_eq!(restored.players().len(), second.players().len());
        assert_eq!(restored.elites().len(), second.elites().len());
        for (restored, original) in restored.players().iter().zip(second.players()) {
            assert_eq!(restored.genome(), original.genome());
            assert_eq!(restored.generation(), original.generation());
            // Histories do not survive the round trip.
            assert!(restored.history().is_empty());
        }
        for (restored, original) in restored.elites().iter().zip(second.elites()) {
            assert_eq!(restored.genome(), original.genome());
        }
    }
}
