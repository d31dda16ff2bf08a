//! Log-domain statistics for heavy-tailed game outcomes.
//!
//! 2048 scores are multiplicative by nature (every merge doubles a
//! tile), so fitness comparisons work on logarithms: the geometric mean
//! summarizes a player's typical outcome without rare huge games
//! dominating the estimate, and the spread of the log-scores gives a
//! standard error usable for confidence-bound pruning.
//!
//! # Examples
//!
//! ```
//! use twenty48_stats::geometric_mean;
//!
//! let mean = geometric_mean([10.0, 100.0, 1000.0]);
//! assert!((mean - 100.0).abs() < 1e-9);
//! assert!(geometric_mean([]).is_nan());
//! ```

pub use self::log_stats::LogStats;

pub mod log_stats;

/// Computes the geometric mean: `exp(mean(ln(values)))`.
///
/// Returns a not-a-number sentinel for an empty input — "no games
/// played yet" is a routine state, not an error.
#[must_use]
pub fn geometric_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut log_sum = 0.0;
    let mut count: usize = 0;
    for value in values {
        log_sum += value.ln();
        count += 1;
    }
    if count == 0 {
        return f64::NAN;
    }
    #[expect(clippy::cast_precision_loss)]
    let mean = log_sum / count as f64;
    mean.exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_mean_of_powers_of_ten() {
        let mean = geometric_mean([10.0, 100.0, 1000.0]);
        assert!((mean - 100.0).abs() < 1e-9);
    }

    #[test]
    fn geometric_mean_empty_is_nan() {
        assert!(geometric_mean([]).is_nan());
    }

    #[test]
    fn geometric_mean_single_value() {
        let mean = geometric_mean([42.0]);
        assert!((mean - 42.0).abs() < 1e-9);
    }
}
