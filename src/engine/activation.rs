//! Activation functions for matrices and layers.
//!
//! The set is closed: every matrix carries one of these tags, and the tag
//! travels with the weights through serialization so an external store can
//! rebuild a layer without knowing anything else about it.

use serde::{Deserialize, Serialize};

/// The nonlinearity bound to a matrix or layer at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// max(0, x)
    ReLU,
    /// 1 / (1 + e^-x)
    Sigmoid,
}

impl Activation {
    /// Applies the activation function to a single value.
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::ReLU => x.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Applies the derivative of the activation function to a single value.
    #[inline]
    pub fn apply_derivative(self, x: f64) -> f64 {
        match self {
            Activation::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => {
                let s = self.apply(x);
                s * (1.0 - s)
            }
        }
    }

    /// Human-readable name of the function.
    pub fn describe(self) -> &'static str {
        match self {
            Activation::ReLU => "ReLU",
            Activation::Sigmoid => "Sigmoid",
        }
    }
}
