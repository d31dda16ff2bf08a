//! Ternary network weights with genetic reproduction rules.
//!
//! A genome is the complete weight set of a feed-forward network that
//! ranks the four slide directions for a board position. Weights take
//! values from {-1, 0, 1} only; the hidden activations are hard signs,
//! so evaluation is integer-friendly and the output layer needs no
//! non-linearity (only the relative ranking of the four outputs
//! matters).
//!
//! Reproduction copies whole matrix rows from either parent — row
//! granularity keeps co-adapted weight groups together instead of
//! crossing individual weights destructively — and then resamples
//! individual weights at a low rate.

use rand::Rng;
use serde::{Deserialize, Serialize};
use twenty48_engine::{Action, Board, CELL_COUNT, DIRECTIONS};

/// Per-weight probability of being resampled during reproduction.
const MUTATION_RATE: f64 = 0.01;

/// The highest exponent 2048 can represent is 14-ish; dividing by 7
/// and shifting maps exponents onto roughly [-3, 3] for the input layer.
const EXPONENT_HALF_RANGE: f32 = 7.0;

type WeightMatrix = Vec<Vec<i8>>;

/// Shape of a [`Genome`]: hidden width and total hidden layer count.
///
/// One hidden layer means zero hidden-to-hidden matrices; the input
/// matrix feeds the first hidden layer directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeLayout {
    pub hidden_size: usize,
    pub hidden_layers: usize,
}

impl Default for GenomeLayout {
    fn default() -> Self {
        Self {
            hidden_size: 1024,
            hidden_layers: 1,
        }
    }
}

impl GenomeLayout {
    fn hidden_matrices(self) -> usize {
        self.hidden_layers - 1
    }
}

/// Weights for the move-ranking network, immutable once evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    input_weights: WeightMatrix,
    hidden_weights: Vec<WeightMatrix>,
    output_weights: WeightMatrix,
}

impl Genome {
    /// Generates a genome with every weight drawn uniformly from
    /// {-1, 0, 1}.
    pub fn random<R>(layout: GenomeLayout, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(layout.hidden_layers >= 1, "at least one hidden layer");
        assert!(layout.hidden_size >= 1, "hidden layer must not be empty");
        Self {
            input_weights: random_matrix(CELL_COUNT, layout.hidden_size, rng),
            hidden_weights: (0..layout.hidden_matrices())
                .map(|_| random_matrix(layout.hidden_size, layout.hidden_size, rng))
                .collect(),
            output_weights: random_matrix(layout.hidden_size, DIRECTIONS.len(), rng),
        }
    }

    /// Builds a child genome from two parents, falling back to random
    /// generation when a parent is missing or its shape does not match
    /// `layout`. The fallback is a degraded-but-valid construction
    /// path, not an error.
    pub fn from_parents<R>(
        layout: GenomeLayout,
        mom: Option<&Genome>,
        dad: Option<&Genome>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        match (mom, dad) {
            (Some(mom), Some(dad)) if mom.layout() == layout && dad.layout() == layout => {
                let mut child = Self::crossover(mom, dad, rng);
                child.mutate(rng);
                child
            }
            _ => Self::random(layout, rng),
        }
    }

    /// Row-granular crossover: each matrix row is copied whole from one
    /// parent or the other with equal probability.
    fn crossover<R>(mom: &Genome, dad: &Genome, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            input_weights: cross_matrix(&mom.input_weights, &dad.input_weights, rng),
            hidden_weights: mom
                .hidden_weights
                .iter()
                .zip(&dad.hidden_weights)
                .map(|(m, d)| cross_matrix(m, d, rng))
                .collect(),
            output_weights: cross_matrix(&mom.output_weights, &dad.output_weights, rng),
        }
    }

    /// Resamples each weight from {-1, 0, 1} with probability
    /// [`MUTATION_RATE`], independently.
    fn mutate<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let matrices = std::iter::once(&mut self.input_weights)
            .chain(&mut self.hidden_weights)
            .chain(std::iter::once(&mut self.output_weights));
        for matrix in matrices {
            for weight in matrix.iter_mut().flatten() {
                if rng.random_bool(MUTATION_RATE) {
                    *weight = rng.random_range(-1..=1);
                }
            }
        }
    }

    /// The shape of this genome's weight matrices.
    #[must_use]
    pub fn layout(&self) -> GenomeLayout {
        GenomeLayout {
            hidden_size: self.input_weights[0].len(),
            hidden_layers: self.hidden_weights.len() + 1,
        }
    }

    /// Ranks the four directions for `board`, best first.
    ///
    /// Exponents are linearly scaled to roughly [-3, 3], pushed through
    /// the input and hidden matrices with a hard-sign activation, then
    /// combined linearly by the output matrix. Ties keep the
    /// [`DIRECTIONS`] order (the sort is stable).
    #[must_use]
    pub fn move_order(&self, board: &Board) -> [Action; 4] {
        let input: Vec<f32> = board
            .flattened()
            .iter()
            .map(|&e| 3.0 * (f32::from(e) / EXPONENT_HALF_RANGE - 1.0))
            .collect();

        let mut hidden = mat_vec(&input, &self.input_weights);
        for value in &mut hidden {
            *value = hard_sign(*value);
        }
        for matrix in &self.hidden_weights {
            hidden = mat_vec(&hidden, matrix);
            for value in &mut hidden {
                *value = hard_sign(*value);
            }
        }
        let outputs = mat_vec(&hidden, &self.output_weights);

        let mut ranking: [usize; 4] = [0, 1, 2, 3];
        ranking.sort_by(|&a, &b| {
            outputs[b]
                .partial_cmp(&outputs[a])
                .expect("network outputs are finite")
        });
        ranking.map(|i| DIRECTIONS[i])
    }

    /// Fraction of positions at which both genomes hold the same
    /// weight, over the fully flattened weight vectors. Symmetric, and
    /// 1 for a genome compared against itself.
    ///
    /// # Panics
    ///
    /// Panics when the genomes have different shapes.
    #[must_use]
    pub fn similarity(&self, other: &Genome) -> f64 {
        assert_eq!(
            self.layout(),
            other.layout(),
            "similarity requires identical genome shapes"
        );
        let mut total: usize = 0;
        let mut matching: usize = 0;
        for (a, b) in self.flat_weights().zip(other.flat_weights()) {
            total += 1;
            if a == b {
                matching += 1;
            }
        }
        #[expect(clippy::cast_precision_loss)]
        let similarity = matching as f64 / total as f64;
        similarity
    }

    fn flat_weights(&self) -> impl Iterator<Item = i8> + '_ {
        std::iter::once(&self.input_weights)
            .chain(&self.hidden_weights)
            .chain(std::iter::once(&self.output_weights))
            .flatten()
            .flatten()
            .copied()
    }
}

fn random_matrix<R>(rows: usize, cols: usize, rng: &mut R) -> WeightMatrix
where
    R: Rng + ?Sized,
{
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.random_range(-1..=1)).collect())
        .collect()
}

fn cross_matrix<R>(mom: &WeightMatrix, dad: &WeightMatrix, rng: &mut R) -> WeightMatrix
where
    R: Rng + ?Sized,
{
    mom.iter()
        .zip(dad)
        .map(|(m, d)| if rng.random_bool(0.5) { m.clone() } else { d.clone() })
        .collect()
}

/// `x * W` where `W` has `x.len()` rows.
fn mat_vec(x: &[f32], matrix: &WeightMatrix) -> Vec<f32> {
    debug_assert_eq!(x.len(), matrix.len());
    let cols = matrix[0].len();
    let mut out = vec![0.0; cols];
    for (value, row) in x.iter().zip(matrix) {
        for (acc, &weight) in out.iter_mut().zip(row) {
            *acc += value * f32::from(weight);
        }
    }
    out
}

fn hard_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
