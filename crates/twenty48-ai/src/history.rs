use twenty48_stats::{LogStats, geometric_mean};

/// Append-only record of a player's finished games.
///
/// Scores and highest tiles are pushed in game order and never
/// reordered; derived statistics use the geometric mean because game
/// outcomes are multiplicative and heavy-tailed. With no games played
/// the means are a not-a-number sentinel rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameHistory {
    scores: Vec<u32>,
    highest_tiles: Vec<u32>,
}

impl GameHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one finished game's results.
    pub fn record(&mut self, score: u32, highest_tile: u32) {
        self.scores.push(score);
        self.highest_tiles.push(highest_tile);
    }

    #[must_use]
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    #[must_use]
    pub fn highest_tiles(&self) -> &[u32] {
        &self.highest_tiles
    }

    #[must_use]
    pub fn games_played(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Geometric mean of all per-game scores; NaN with no games.
    #[must_use]
    pub fn geometric_mean_score(&self) -> f64 {
        geometric_mean(self.scores.iter().map(|&s| f64::from(s)))
    }

    /// Geometric mean of all per-game highest tiles; NaN with no games.
    #[must_use]
    pub fn geometric_mean_highest_tile(&self) -> f64 {
        geometric_mean(self.highest_tiles.iter().map(|&t| f64::from(t)))
    }

    /// Log-domain score statistics for confidence-bound pruning.
    /// `None` with no games.
    #[must_use]
    pub fn log_score_stats(&self) -> Option<LogStats> {
        LogStats::new(self.scores.iter().map(|&s| f64::from(s)))
    }
}
