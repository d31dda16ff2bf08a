/// Summary statistics of a sample in log space.
///
/// Built from positive observations; the geometric mean and the
/// standard deviation of the logs together support one-sided
/// confidence bounds on a player's true geometric-mean score.
#[derive(Debug, Clone, Copy)]
pub struct LogStats {
    /// `exp(mean(ln(values)))`.
    pub geometric_mean: f64,
    /// Population standard deviation of `ln(values)`.
    pub log_std_dev: f64,
    /// Number of observations.
    pub count: usize,
}

impl LogStats {
    /// Computes log-domain statistics over the given values.
    ///
    /// Returns `None` for an empty sample.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let logs: Vec<f64> = values.into_iter().map(f64::ln).collect();
        if logs.is_empty() {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let n = logs.len() as f64;
        let mean = logs.iter().sum::<f64>() / n;
        let variance = logs.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            geometric_mean: mean.exp(),
            log_std_dev: variance.sqrt(),
            count: logs.len(),
        })
    }

    /// Standard error of the mean log-value.
    #[must_use]
    pub fn standard_error(&self) -> f64 {
        #[expect(clippy::cast_precision_loss)]
        let n = self.count as f64;
        self.log_std_dev / n.sqrt()
    }

    /// One-sided lower confidence bound on the geometric mean:
    /// `geometric_mean / exp(z * standard_error)`.
    #[must_use]
    pub fn lower_bound(&self, z: f64) -> f64 {
        self.geometric_mean / (z * self.standard_error()).exp()
    }
}
