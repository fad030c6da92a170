//! # Evonet - Dense Layer Engine with Dual Training Regimes
//!
//! A fully-connected neural-network layer engine where the same weight
//! matrix serves two training regimes: gradient-based backpropagation and
//! evolutionary (genetic) weight search.
//!
//! ## Features
//!
//! - Dense f64 matrix primitive bound to a pluggable activation (ReLU,
//!   Sigmoid)
//! - Stateful forward inference and in-place gradient weight updates
//! - Parallel backward-pass reduction that is bit-identical to serial
//!   execution
//! - Genetic operators (randomize, mutate, arithmetic crossover) over the
//!   same weight storage
//! - Fitness-sorted breeding pool for whole-network genomes
//! - Plain-data weight snapshots with JSON save/load
//!
//! ## Core Modules
//!
//! - [`engine::matrix`] - Dense matrix storage and primitives
//! - [`engine::layer`] - Fully-connected layer and its builder
//! - [`engine::executor`] - Execution context for the backward reduction
//! - [`engine::network`] - Multi-layer network stack
//! - [`engine::evolution`] - Breeding pool over network genomes
//! - [`engine::snapshot`] - Persistence boundary types

/// Dense-layer compute core and evolution machinery.
pub mod engine {
    /// Activation functions bound to matrices and layers.
    pub mod activation;
    /// Error taxonomy for engine operations.
    pub mod error;
    /// Breeding pool for evolved network genomes.
    pub mod evolution;
    /// Execution context for the backward-pass reduction.
    pub mod executor;
    /// Fully-connected layer, forward/backward passes and builder.
    pub mod layer;
    /// Dense matrix storage bound to an activation function.
    pub mod matrix;
    /// Multi-layer network stack.
    pub mod network;
    /// Plain-data weight snapshots for external stores.
    pub mod snapshot;
}
