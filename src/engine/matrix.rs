//! Dense matrix storage bound to an activation function.
//!
//! The matrix is organized as output-node rows by input-node columns, with
//! the bias carried in an extra column on creation. The same cell grid is
//! read by the forward/backward machinery and mutated by the genetic
//! operators; both views must stay consistent, so dimensions are fixed for
//! the lifetime of the value.

use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::error::NetError;

/// A 2D grid of f64 weights plus the activation function bound to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseMatrix {
    cells: Array2<f64>,
    activation: Activation,
}

impl DenseMatrix {
    /// Creates a zero-filled matrix of the given dimensions.
    pub fn zeros(rows: usize, cols: usize, activation: Activation) -> Self {
        Self {
            cells: Array2::zeros((rows, cols)),
            activation,
        }
    }

    /// Wraps an existing cell grid. Ownership of the grid transfers to the
    /// matrix.
    pub fn from_grid(cells: Array2<f64>, activation: Activation) -> Self {
        Self { cells, activation }
    }

    /// Creates a matrix with every cell drawn uniformly from [-1, 1].
    pub fn new_random(rows: usize, cols: usize, activation: Activation) -> Self {
        Self {
            cells: Array2::random((rows, cols), Uniform::new(-1.0, 1.0)),
            activation,
        }
    }

    /// Number of rows (output nodes).
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns (input nodes plus the bias column).
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// The activation function bound to this matrix.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// The raw cell grid, for external stores and collaborators.
    pub fn grid(&self) -> &Array2<f64> {
        &self.cells
    }

    /// Matrix product of `self` and `other`.
    ///
    /// The number of rows in `other` has to equal the number of columns in
    /// this, the previous layer matrix. The result has `self.rows()` rows
    /// and `other.cols()` columns and carries this matrix's activation.
    /// Neither operand is mutated.
    pub fn dot(&self, other: &DenseMatrix) -> Result<DenseMatrix, NetError> {
        if self.cols() != other.rows() {
            return Err(NetError::DimensionMismatch {
                left: (self.rows(), self.cols()),
                right: (other.rows(), other.cols()),
            });
        }
        Ok(Self {
            cells: self.cells.dot(&other.cells),
            activation: self.activation,
        })
    }

    /// Returns a new matrix with the activation function applied to every
    /// cell. `self` is unchanged.
    pub fn activate(&self) -> DenseMatrix {
        Self {
            cells: self.cells.mapv(|x| self.activation.apply(x)),
            activation: self.activation,
        }
    }

    /// Fills every cell with a fresh value drawn uniformly from [-1, 1].
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.cells.mapv_inplace(|_| rng.random_range(-1.0..1.0));
    }

    /// Builds a single-column matrix from a flat slice, carrying forward
    /// this matrix's activation binding.
    ///
    /// Used to lift an input vector into matrix form before a dot product.
    pub fn single_column_from(&self, values: &[f64]) -> DenseMatrix {
        Self {
            cells: Array2::from_shape_fn((values.len(), 1), |(i, _)| values[i]),
            activation: self.activation,
        }
    }

    /// Flattens the matrix row-major into a vector of length rows * cols.
    pub fn to_vec(&self) -> Vec<f64> {
        self.cells.iter().copied().collect()
    }

    /// For a single-column matrix, returns a (rows+1 x 1) matrix whose first
    /// `rows` cells copy column 0 and whose final cell is the bias value 1.
    pub fn add_bias(&self) -> DenseMatrix {
        let rows = self.rows();
        Self {
            cells: Array2::from_shape_fn((rows + 1, 1), |(i, _)| {
                if i < rows { self.cells[[i, 0]] } else { 1.0 }
            }),
            activation: self.activation,
        }
    }

    /// Mutates the matrix in place.
    ///
    /// Each cell is independently replaced, with probability
    /// `mutation_rate`, by a fresh value drawn uniformly from [-1, 1].
    /// There is no structural correlation between cells.
    pub fn mutate<R: Rng>(&mut self, mutation_rate: f64, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            if rng.random::<f64>() < mutation_rate {
                *cell = rng.random_range(-1.0..1.0);
            }
        }
    }

    /// Arithmetic crossover with a partner matrix.
    ///
    /// Draws one alpha in [0, 1) for the whole operation and blends:
    /// child = alpha * self + (1 - alpha) * partner. Alpha 0 favors the
    /// partner, alpha 1 favors this matrix, alpha 0.5 blends equally. A
    /// random alpha introduces maximum variation.
    pub fn crossover<R: Rng>(
        &self,
        partner: &DenseMatrix,
        rng: &mut R,
    ) -> Result<DenseMatrix, NetError> {
        self.crossover_with(partner, rng.random::<f64>())
    }

    /// Arithmetic crossover with a caller-chosen blend factor.
    ///
    /// The single alpha applies to every cell; there is no per-cell or
    /// per-row selection.
    pub fn crossover_with(
        &self,
        partner: &DenseMatrix,
        alpha: f64,
    ) -> Result<DenseMatrix, NetError> {
        if self.rows() != partner.rows() || self.cols() != partner.cols() {
            return Err(NetError::DimensionMismatch {
                left: (self.rows(), self.cols()),
                right: (partner.rows(), partner.cols()),
            });
        }
        Ok(Self {
            cells: &self.cells * alpha + &partner.cells * (1.0 - alpha),
            activation: self.activation,
        })
    }

    /// Reads the cell at (row, col). Panics on an out-of-range index, which
    /// is a caller bug rather than a recoverable condition.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[[row, col]]
    }

    /// Writes the cell at (row, col). Panics on an out-of-range index.
    pub fn put(&mut self, row: usize, col: usize, value: f64) {
        self.cells[[row, col]] = value;
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Array2<f64> {
        &mut self.cells
    }
}
