#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evonet::engine::activation::Activation;
use evonet::engine::error::NetError;
use evonet::engine::executor::Executor;
use evonet::engine::network::Network;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn small_network() -> Network {
    Network::new(&[3, 4, 2], Activation::Sigmoid, |_, _| 0.5).expect("valid sizes")
}

#[test]
fn test_new_builds_chained_layers() {
    let network = small_network();

    assert_eq!(network.layers().len(), 2);
    assert_eq!(network.input_count(), 3);
    assert_eq!(network.output_count(), 2);
    assert_eq!(network.layers()[0].input_count(), 3);
    assert_eq!(network.layers()[0].output_count(), 4);
    assert_eq!(network.layers()[1].input_count(), 4);
    assert_eq!(network.layers()[1].output_count(), 2);
}

#[test]
fn test_new_rejects_single_size() {
    assert!(matches!(
        Network::new(&[3], Activation::ReLU, |_, _| 0.0),
        Err(NetError::InvalidArgument { .. })
    ));
}

#[test]
fn test_new_rejects_zero_width_layer() {
    assert!(matches!(
        Network::new(&[3, 0, 2], Activation::ReLU, |_, _| 0.0),
        Err(NetError::InvalidArgument { .. })
    ));
}

#[test]
fn test_forward_chains_layer_outputs() {
    let mut network = small_network();

    let output = network.forward(&[1.0, -1.0, 0.5]).expect("matching length");

    assert_eq!(output.len(), 2);
    // sigmoid keeps every output in (0, 1)
    for value in &output {
        assert!(*value > 0.0 && *value < 1.0);
    }

    // repeated forward passes are deterministic
    let replay = network.forward(&[1.0, -1.0, 0.5]).expect("matching length");
    assert_eq!(output, replay);
}

#[test]
fn test_forward_length_mismatch() {
    let mut network = small_network();

    assert!(matches!(
        network.forward(&[1.0, 2.0]),
        Err(NetError::LengthMismatch {
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn test_propagate_error_walks_stack_in_reverse() {
    let mut network = small_network();
    let exec = Executor::serial();

    network.forward(&[1.0, -1.0, 0.5]).expect("matching length");
    let before = network.to_flat_vec();

    let delta = network
        .propagate_error(&[0.5, -0.5], 0.1, &exec)
        .expect("matching length");

    // the returned error has the width of the network's input
    assert_eq!(delta.len(), 3);
    // every layer saw a weight update
    let after = network.to_flat_vec();
    assert_ne!(before, after);
}

#[test]
fn test_training_reduces_error_on_fixed_target() {
    // single sigmoid output trained toward 1.0 with a fixed input
    let mut network = Network::new(&[2, 1], Activation::Sigmoid, |_, _| 0.25).expect("valid sizes");
    let exec = Executor::serial();
    let input = [1.0, 0.5];

    let initial = network.forward(&input).expect("matching length")[0];
    for _ in 0..50 {
        let output = network.forward(&input).expect("matching length")[0];
        // d(mse)/d(pre-activation) for target 1.0
        let error = output - 1.0;
        network
            .propagate_error(&[error], 0.5, &exec)
            .expect("matching length");
    }
    let trained = network.forward(&input).expect("matching length")[0];

    assert!((1.0 - trained).abs() < (1.0 - initial).abs());
}

#[test]
fn test_crossover_blends_layer_by_layer() {
    let mut rng = StdRng::seed_from_u64(17);
    let a = Network::new(&[3, 4, 2], Activation::ReLU, |_, _| 1.0).expect("valid sizes");
    let b = Network::new(&[3, 4, 2], Activation::ReLU, |_, _| -1.0).expect("valid sizes");

    let child = a.crossover(&b, &mut rng).expect("same topology");

    assert_eq!(child.layers().len(), 2);
    // every child weight lies between the parents' constant fills
    for value in child.to_flat_vec() {
        assert!((-1.0..=1.0).contains(&value));
    }
}

#[test]
fn test_crossover_rejects_mismatched_stacks() {
    let mut rng = StdRng::seed_from_u64(0);
    let a = Network::new(&[3, 4, 2], Activation::ReLU, |_, _| 0.0).expect("valid sizes");
    let b = Network::new(&[3, 2], Activation::ReLU, |_, _| 0.0).expect("valid sizes");

    assert!(matches!(
        a.crossover(&b, &mut rng),
        Err(NetError::LengthMismatch { .. })
    ));
}

#[test]
fn test_mutate_and_randomize_are_seed_deterministic() {
    let mut first = small_network();
    let mut second = small_network();

    first.mutate(0.5, &mut StdRng::seed_from_u64(42));
    second.mutate(0.5, &mut StdRng::seed_from_u64(42));
    assert_eq!(first.to_flat_vec(), second.to_flat_vec());

    first.randomize(&mut StdRng::seed_from_u64(43));
    second.randomize(&mut StdRng::seed_from_u64(43));
    assert_eq!(first.to_flat_vec(), second.to_flat_vec());
}

#[test]
fn test_to_flat_vec_covers_every_weight() {
    let network = small_network();

    // layer 0: 4 nodes x (3 inputs + bias), layer 1: 2 nodes x (4 + bias)
    assert_eq!(network.to_flat_vec().len(), 4 * 4 + 2 * 5);
}
