//! Construction, prediction and single-sample training through the public API.

use approx::assert_relative_eq;
use ffnet::{argmax, Initializer, Matrix, NetError, Network, NetworkConfig, TrainingItem};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn zero_network(config: NetworkConfig) -> Network {
    let matrices = config
        .weight_shapes()
        .into_iter()
        .map(|(rows, cols)| Matrix::zeros(rows, cols))
        .collect();
    Network::from_weights(config, matrices).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

mod construction {
    use super::*;

    #[test]
    fn matrix_count_and_shapes_follow_config() {
        let mut rng = StdRng::seed_from_u64(100);
        for &(inputs, outputs, hidden, width) in &[
            (1, 1, 0, 1),
            (784, 10, 1, 200),
            (5, 3, 3, 7),
            (2, 4, 0, 9),
        ] {
            let config = NetworkConfig::new(inputs, outputs, hidden, width, 0.1);
            let net = Network::new(config, &mut rng).unwrap();
            assert_eq!(net.weights().len(), hidden + 1);

            let shapes: Vec<(usize, usize)> = net.weights().iter().map(Matrix::shape).collect();
            if hidden == 0 {
                assert_eq!(shapes, vec![(outputs, inputs)]);
            } else {
                assert_eq!(shapes[0], (width, inputs));
                assert_eq!(*shapes.last().unwrap(), (outputs, width));
                assert!(shapes[1..hidden].iter().all(|&s| s == (width, width)));
            }
        }
    }

    #[test]
    fn both_initializers_produce_non_zero_weights() {
        for init in [Initializer::UniformFanIn, Initializer::StandardNormal] {
            let config = NetworkConfig::new(4, 2, 1, 3, 0.1).with_initializer(init);
            let net = Network::with_seed(config, 9).unwrap();
            for m in net.weights() {
                assert!(m.as_slice().iter().any(|&w| w != 0.0));
            }
        }
    }

    #[test]
    fn from_weights_rejects_wrong_shapes() {
        let config = NetworkConfig::new(2, 1, 1, 3, 0.1);
        let result = Network::from_weights(config, vec![Matrix::zeros(3, 2), Matrix::zeros(3, 1)]);
        assert!(matches!(result, Err(NetError::CorruptWeights(_))));
    }
}

// ============================================================================
// Prediction
// ============================================================================

mod prediction {
    use super::*;

    #[test]
    fn zero_weights_predict_one_half_everywhere() {
        let net = zero_network(NetworkConfig::new(3, 4, 2, 5, 0.1));
        let output = net.predict(&[0.3, -2.0, 8.0]).unwrap();
        assert_eq!(output, vec![0.5; 4]);
    }

    #[test]
    fn outputs_lie_strictly_between_zero_and_one() {
        let net = Network::with_seed(NetworkConfig::new(6, 3, 2, 4, 0.1), 12).unwrap();
        let output = net.predict(&[0.9, 0.1, 0.5, 0.3, 0.7, 0.2]).unwrap();
        assert_eq!(output.len(), 3);
        assert!(output.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn wrong_input_length_is_a_dimension_mismatch() {
        let net = Network::with_seed(NetworkConfig::new(3, 2, 1, 4, 0.1), 1).unwrap();
        for input in [vec![0.1, 0.2], vec![0.1, 0.2, 0.3, 0.4], vec![]] {
            match net.predict(&input) {
                Err(NetError::DimensionMismatch { expected, actual, .. }) => {
                    assert_eq!(expected, 3);
                    assert_eq!(actual, input.len());
                }
                other => panic!("expected DimensionMismatch, got {other:?}"),
            }
        }
    }

    #[test]
    fn huge_activations_do_not_produce_nan() {
        let config = NetworkConfig::new(1, 1, 0, 0, 0.1);
        let net = Network::from_weights(config, vec![Matrix::from_vec(1, 1, vec![1.0]).unwrap()]).unwrap();
        for x in [-1.0e6, -800.0, 800.0, 1.0e6] {
            let y = net.predict(&[x]).unwrap()[0];
            assert!(y.is_finite() && (0.0..=1.0).contains(&y), "{x} -> {y}");
        }
    }

    #[test]
    fn classify_uses_first_maximum() {
        assert_eq!(argmax(&[0.5, 0.5, 0.3]), Some(0));
        let net = zero_network(NetworkConfig::new(2, 3, 1, 2, 0.1));
        assert_eq!(net.classify(&[0.4, 0.6]).unwrap(), 0);
    }
}

// ============================================================================
// Training
// ============================================================================

mod training {
    use super::*;

    #[test]
    fn one_step_reduces_error_on_the_trained_sample() {
        for seed in 0..20 {
            let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 3, 0.5), seed).unwrap();
            let item = TrainingItem::new(vec![0.1, 0.2], vec![0.9]);

            let before = net.squared_error(&item).unwrap();
            net.train(&item).unwrap();
            let after = net.squared_error(&item).unwrap();
            assert!(after < before, "seed {seed}: {after} >= {before}");
        }
    }

    #[test]
    fn repeated_training_converges_on_one_sample() {
        let mut net = Network::with_seed(NetworkConfig::new(4, 3, 2, 5, 0.5), 3).unwrap();
        let item = TrainingItem::labelled(vec![0.2, 0.9, 0.4, 0.1], 0, 3).unwrap();
        let before = net.squared_error(&item).unwrap();
        for _ in 0..300 {
            net.train(&item).unwrap();
        }
        let after = net.squared_error(&item).unwrap();
        assert!(after < before / 10.0, "{before} -> {after}");
        assert_eq!(net.classify(item.input()).unwrap(), 0);
    }

    #[test]
    fn zero_hidden_layers_train_directly() {
        let mut net = zero_network(NetworkConfig::new(2, 1, 0, 0, 1.0));
        net.train(&TrainingItem::new(vec![1.0, 0.0], vec![1.0])).unwrap();
        // e = 0.5, a(1-a) = 0.25
        assert_relative_eq!(net.weights()[0].get(0, 0), 0.125, epsilon = 1e-12);
        assert_eq!(net.weights()[0].get(0, 1), 0.0);
    }

    #[test]
    fn bad_items_leave_weights_untouched() {
        let mut net = Network::with_seed(NetworkConfig::new(3, 2, 1, 4, 0.3), 5).unwrap();
        let snapshot = net.weights().to_vec();
        assert!(net.train(&TrainingItem::new(vec![0.1; 4], vec![0.5; 2])).is_err());
        assert!(net.train(&TrainingItem::new(vec![0.1; 3], vec![0.5; 1])).is_err());
        assert_eq!(net.weights(), snapshot.as_slice());
    }

    #[test]
    fn same_seed_and_data_give_identical_networks() {
        let items: Vec<TrainingItem> = (0..5)
            .map(|i| TrainingItem::labelled(vec![0.1 * i as f64, 0.5, 0.9], i % 2, 2).unwrap())
            .collect();
        let config = NetworkConfig::new(3, 2, 1, 4, 0.2);

        let mut a = Network::with_seed(config.clone(), 77).unwrap();
        let mut b = Network::with_seed(config, 77).unwrap();
        a.train_multiple(&items).unwrap();
        b.train_multiple(&items).unwrap();
        assert_eq!(a.weights(), b.weights());
    }
}
