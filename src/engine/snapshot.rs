//! Plain-data weight snapshots for external stores.
//!
//! The engine exposes trained or evolved weights as nested vectors plus an
//! activation tag; how a collaborator stores them is its own concern. JSON
//! file helpers cover the common local case.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::activation::Activation;
use super::error::NetError;
use super::layer::Layer;
use super::matrix::DenseMatrix;
use super::network::Network;

/// Serializable mirror of one layer's weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSnapshot {
    /// Weight rows, one per output node; each row is inputs + bias wide.
    pub weights: Vec<Vec<f64>>,
    /// Activation tag the layer was bound to.
    pub activation: Activation,
}

/// Serializable mirror of a whole network, input end first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// One snapshot per layer.
    pub layers: Vec<LayerSnapshot>,
}

impl Layer {
    /// Captures the layer's weights and activation tag as plain data.
    pub fn snapshot(&self) -> LayerSnapshot {
        let weights = self
            .weights()
            .grid()
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();
        LayerSnapshot {
            weights,
            activation: self.activation(),
        }
    }

    /// Rebuilds a layer from a snapshot.
    ///
    /// The grid must be rectangular, non-empty, and at least two columns
    /// wide (one input plus the bias column).
    pub fn from_snapshot(snapshot: &LayerSnapshot) -> Result<Layer, NetError> {
        let rows = snapshot.weights.len();
        if rows == 0 {
            return Err(NetError::InvalidArgument {
                name: "snapshot row count",
            });
        }
        let cols = snapshot.weights[0].len();
        if cols < 2 {
            return Err(NetError::InvalidArgument {
                name: "snapshot column count",
            });
        }
        for row in &snapshot.weights {
            if row.len() != cols {
                return Err(NetError::DimensionMismatch {
                    left: (rows, cols),
                    right: (rows, row.len()),
                });
            }
        }
        let cells = Array2::from_shape_fn((rows, cols), |(i, j)| snapshot.weights[i][j]);
        Ok(Layer::from_weights(DenseMatrix::from_grid(
            cells,
            snapshot.activation,
        )))
    }
}

impl Network {
    /// Captures every layer as plain data, input end first.
    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            layers: self.layers().iter().map(Layer::snapshot).collect(),
        }
    }

    /// Rebuilds a network from a snapshot, checking that consecutive
    /// layers still chain.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Network, NetError> {
        if snapshot.layers.is_empty() {
            return Err(NetError::InvalidArgument {
                name: "snapshot layer count",
            });
        }
        let mut layers = Vec::with_capacity(snapshot.layers.len());
        for layer_snapshot in &snapshot.layers {
            layers.push(Layer::from_snapshot(layer_snapshot)?);
        }
        for pair in layers.windows(2) {
            if pair[0].output_count() != pair[1].input_count() {
                return Err(NetError::DimensionMismatch {
                    left: (pair[0].output_count(), pair[0].input_count() + 1),
                    right: (pair[1].output_count(), pair[1].input_count() + 1),
                });
            }
        }
        Ok(Network::from_layers(layers))
    }

    /// Saves the network's snapshot to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a network from a JSON snapshot file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: NetworkSnapshot = serde_json::from_str(&json)?;
        Ok(Network::from_snapshot(&snapshot)?)
    }
}
