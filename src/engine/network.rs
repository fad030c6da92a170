//! Multi-layer network stack.
//!
//! Chains fully-connected layers for forward inference and reverse error
//! propagation, and exposes the whole stack as one genome for the genetic
//! operators.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::error::NetError;
use super::executor::Executor;
use super::layer::Layer;

/// An ordered stack of fully-connected layers, input end first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a network from consecutive layer sizes.
    ///
    /// `layer_sizes[0]` is the input width; each following entry is the
    /// node count of one layer. Every layer is validated through the
    /// layer builder, and `initializer` is called once per weight cell.
    pub fn new<F>(
        layer_sizes: &[usize],
        activation: Activation,
        mut initializer: F,
    ) -> Result<Self, NetError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        if layer_sizes.len() < 2 {
            return Err(NetError::InvalidArgument {
                name: "number of layer sizes",
            });
        }
        let mut layers = Vec::with_capacity(layer_sizes.len() - 1);
        for pair in layer_sizes.windows(2) {
            layers.push(
                Layer::builder()
                    .set_activation(activation)
                    .set_num_inputs(pair[0])
                    .set_num_nodes(pair[1])
                    .build(&mut initializer)?,
            );
        }
        Ok(Self { layers })
    }

    pub(crate) fn from_layers(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// The layers from input end to output end.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Width of the input vector the network accepts.
    pub fn input_count(&self) -> usize {
        self.layers[0].input_count()
    }

    /// Width of the output vector the network produces.
    pub fn output_count(&self) -> usize {
        self.layers[self.layers.len() - 1].output_count()
    }

    /// Runs a forward pass through every layer.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>, NetError> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.compute_output(&current)?.to_vec();
        }
        Ok(current)
    }

    /// Propagates the output-layer error back through the stack, updating
    /// every layer's weights, and returns the error at the input end.
    ///
    /// Layer k consumes layer k+1's downstream error, so updates across
    /// layers are naturally serialized.
    pub fn propagate_error(
        &mut self,
        output_error: &[f64],
        learning_rate: f64,
        exec: &Executor,
    ) -> Result<Vec<f64>, NetError> {
        let mut error = output_error.to_vec();
        for layer in self.layers.iter_mut().rev() {
            error = layer.propagate_error(&error, learning_rate, exec)?;
        }
        Ok(error)
    }

    /// Fills every layer's weights with fresh uniform values in [-1, 1].
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            layer.randomize(rng);
        }
    }

    /// Mutates every layer's weights cell-independently.
    pub fn mutate<R: Rng>(&mut self, mutation_rate: f64, rng: &mut R) {
        for layer in &mut self.layers {
            layer.mutate(mutation_rate, rng);
        }
    }

    /// Creates a child network by layer-wise arithmetic crossover.
    ///
    /// Each layer pair draws its own blend factor. Both parents must have
    /// the same number of layers and matching layer shapes.
    pub fn crossover<R: Rng>(&self, partner: &Network, rng: &mut R) -> Result<Network, NetError> {
        if self.layers.len() != partner.layers.len() {
            return Err(NetError::LengthMismatch {
                expected: self.layers.len(),
                found: partner.layers.len(),
            });
        }
        let mut layers = Vec::with_capacity(self.layers.len());
        for (own, other) in self.layers.iter().zip(&partner.layers) {
            layers.push(own.crossover(other, rng)?);
        }
        Ok(Self { layers })
    }

    /// Flattens every layer's weights row-major into one genome vector.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        let mut flat = Vec::new();
        for layer in &self.layers {
            flat.extend(layer.weights().to_vec());
        }
        flat
    }
}
