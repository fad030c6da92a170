//! Fully-connected layer: forward inference, error propagation and
//! validated construction.
//!
//! The weight matrix is organized as output-node rows by input-node columns
//! plus one bias column. The layer owns two transient buffers, overwritten
//! on every forward and backward call; a layer is never shared between two
//! positions in a network topology.

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::error::NetError;
use super::executor::Executor;
use super::matrix::DenseMatrix;

/// Fixed value of the bias slot at the end of every input buffer. Set once
/// at construction and never overwritten.
const BIAS_INPUT: f64 = -1.0;

/// One fully-connected layer of a feedforward network.
///
/// Supports two training regimes over the same weight matrix: gradient
/// descent through [`Layer::propagate_error`], and genetic search through
/// [`Layer::mutate`], [`Layer::crossover`] and [`Layer::randomize`]. The
/// two operation sets must never run concurrently on one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    weights: DenseMatrix,
    last_input: Vec<f64>,
    last_output: Vec<f64>,
}

impl Layer {
    pub(crate) fn from_weights(weights: DenseMatrix) -> Self {
        let mut last_input = vec![0.0; weights.cols()];
        let last_output = vec![0.0; weights.rows()];
        last_input[weights.cols() - 1] = BIAS_INPUT;
        Self {
            weights,
            last_input,
            last_output,
        }
    }

    /// Returns a new builder.
    pub fn builder() -> LayerBuilder {
        LayerBuilder::new()
    }

    /// Number of input (upstream) nodes, excluding the bias slot.
    pub fn input_count(&self) -> usize {
        self.last_input.len() - 1
    }

    /// Number of output (downstream) nodes.
    pub fn output_count(&self) -> usize {
        self.last_output.len()
    }

    /// The weight matrix, for external stores and collaborators.
    pub fn weights(&self) -> &DenseMatrix {
        &self.weights
    }

    /// The activation function bound to this layer's weights.
    pub fn activation(&self) -> Activation {
        self.weights.activation()
    }

    /// Computes the output of the given input vector.
    ///
    /// Overwrites both transient buffers; not reentrant for concurrent
    /// calls on the same instance. On a length mismatch the layer is left
    /// untouched.
    pub fn compute_output(&mut self, input: &[f64]) -> Result<&[f64], NetError> {
        if input.len() != self.input_count() {
            return Err(NetError::LengthMismatch {
                expected: self.input_count(),
                found: input.len(),
            });
        }
        self.last_input[..input.len()].copy_from_slice(input);
        let column = self.weights.single_column_from(&self.last_input);
        let activated = self.weights.dot(&column)?.activate();
        self.last_output = activated.to_vec();
        Ok(&self.last_output)
    }

    /// Given the error propagated from the following layer, updates the
    /// weights in place and returns the error for the preceding layer.
    ///
    /// The downstream error excludes the bias column. Its per-index
    /// contributions are independent and run under `exec`; the weight
    /// update happens strictly after every contribution has been
    /// collected, and serial and pooled execution produce bit-identical
    /// results.
    pub fn propagate_error(
        &mut self,
        upstream_error: &[f64],
        learning_rate: f64,
        exec: &Executor,
    ) -> Result<Vec<f64>, NetError> {
        if upstream_error.len() != self.output_count() {
            return Err(NetError::LengthMismatch {
                expected: self.output_count(),
                found: upstream_error.len(),
            });
        }

        // weights and last_input are read-only until the map joins
        let weights = &self.weights;
        let last_input = &self.last_input;
        let activation = weights.activation();
        let delta = exec.map_indices(self.input_count(), |i| {
            let mut sum = 0.0;
            for (j, &err) in upstream_error.iter().enumerate() {
                // The derivative is taken at the layer's raw input value,
                // not at node j's pre-activation sum. Weight sets trained
                // by earlier versions of this engine only reproduce under
                // this exact formula.
                sum += err * weights.get(j, i) * activation.apply_derivative(last_input[i]);
            }
            sum
        });

        // weights -= learning_rate * outer(upstream_error, last_input),
        // bias column included
        let cells = self.weights.cells_mut();
        for (j, &err) in upstream_error.iter().enumerate() {
            for (i, &x) in self.last_input.iter().enumerate() {
                cells[[j, i]] -= learning_rate * err * x;
            }
        }
        Ok(delta)
    }

    /// Fills the weight matrix with fresh uniform values in [-1, 1].
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.weights.randomize(rng);
    }

    /// Mutates each weight independently with probability `mutation_rate`.
    pub fn mutate<R: Rng>(&mut self, mutation_rate: f64, rng: &mut R) {
        self.weights.mutate(mutation_rate, rng);
    }

    /// Creates a child layer by arithmetic crossover of the weight
    /// matrices.
    ///
    /// The child is a fully formed layer with fresh buffers and its own
    /// bias slot, so every layer invariant holds for it.
    pub fn crossover<R: Rng>(&self, partner: &Layer, rng: &mut R) -> Result<Layer, NetError> {
        Ok(Layer::from_weights(
            self.weights.crossover(&partner.weights, rng)?,
        ))
    }

    /// Crossover with a caller-chosen blend factor.
    pub fn crossover_with(&self, partner: &Layer, alpha: f64) -> Result<Layer, NetError> {
        Ok(Layer::from_weights(
            self.weights.crossover_with(&partner.weights, alpha)?,
        ))
    }
}

/// Fluent, validated configuration for a [`Layer`].
///
/// All three fields are collected before any storage is allocated;
/// [`LayerBuilder::build`] returns an error instead of panicking on an
/// incomplete or invalid configuration.
#[derive(Debug, Default)]
pub struct LayerBuilder {
    activation: Option<Activation>,
    num_inputs: usize,
    num_nodes: usize,
}

impl LayerBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the activation function bound to the layer's weights.
    pub fn set_activation(mut self, activation: Activation) -> Self {
        self.activation = Some(activation);
        self
    }

    /// Sets the number of input (upstream) nodes, excluding the bias.
    pub fn set_num_inputs(mut self, num_inputs: usize) -> Self {
        self.num_inputs = num_inputs;
        self
    }

    /// Sets the number of output nodes.
    pub fn set_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = num_nodes;
        self
    }

    /// Builds the layer, calling `initializer(input_count, output_count)`
    /// once per weight cell.
    ///
    /// Fails with `MissingConfiguration` when the activation function was
    /// never set, and with `InvalidArgument` when either count is zero.
    pub fn build<F>(self, mut initializer: F) -> Result<Layer, NetError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let activation = self.activation.ok_or(NetError::MissingConfiguration {
            name: "activation function",
        })?;
        if self.num_inputs == 0 {
            return Err(NetError::InvalidArgument {
                name: "number of inputs",
            });
        }
        if self.num_nodes == 0 {
            return Err(NetError::InvalidArgument {
                name: "number of nodes",
            });
        }
        // row-major fill, one initializer call per cell
        let mut cells = Array2::zeros((self.num_nodes, self.num_inputs + 1));
        for cell in cells.iter_mut() {
            *cell = initializer(self.num_inputs, self.num_nodes);
        }
        Ok(Layer::from_weights(DenseMatrix::from_grid(
            cells, activation,
        )))
    }
}
