//! Structural edits keep every layer linked to the next one.

use plastic_nn::{Engine, EngineConfig, ErrorKind, NetError};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn assert_linked(engine: &Engine) {
    engine.network().check_links().expect("dimension invariant broken");
    let sizes = engine.layer_sizes();
    for (l, layer) in engine.network().layers().iter().enumerate() {
        let next = sizes.get(l + 1).copied().unwrap_or(0);
        for neuron in &layer.neurons {
            assert_eq!(neuron.weights_out.len(), next, "layer {l} in {sizes:?}");
        }
    }
    assert_eq!(engine.number_of_inputs(), sizes[0]);
    assert_eq!(engine.number_of_outputs(), *sizes.last().unwrap());
    assert_eq!(engine.number_of_hidden_layers(), sizes.len() - 2);
}

#[test]
fn random_edit_sequences_keep_links_consistent() {
    for seed in 0..20 {
        let mut engine = Engine::seeded(&EngineConfig::new(3, 2, vec![4, 2], 2), seed).unwrap();
        let mut ops = StdRng::seed_from_u64(1000 + seed);

        for _ in 0..200 {
            let layers = engine.layer_sizes().len();
            let layer = ops.gen_range(0..layers + 1);
            let result = match ops.gen_range(0..4) {
                0 => engine.add_neuron(layer),
                1 => engine.remove_neuron(layer, ops.gen_range(0..6)),
                2 => engine.add_layer(layer, ops.gen_range(0..5), ops.gen_bool(0.8)),
                _ => engine.remove_layer(layer, ops.gen_bool(0.8)),
            };
            if let Err(e) = result {
                assert!(matches!(e.kind(), ErrorKind::Structural), "unexpected {e}");
            }
            assert_linked(&engine);

            let inputs = vec![0.5; engine.number_of_inputs()];
            let outputs = engine.predict(&inputs).unwrap();
            assert_eq!(outputs.len(), engine.number_of_outputs());
        }
    }
}

#[test]
fn add_then_remove_neuron_restores_network() {
    let config = EngineConfig::new(2, 2, vec![3, 4], 2);
    for layer in 0..4 {
        let mut engine = Engine::seeded(&config, 21).unwrap();
        engine.predict(&[0.2, 0.7]).unwrap();
        let snapshot = engine.network().clone();

        engine.add_neuron(layer).unwrap();
        let last = engine.layer_sizes()[layer] - 1;
        engine.remove_neuron(layer, last).unwrap();

        assert_eq!(engine.network(), &snapshot, "layer {layer}");
    }
}

#[test]
fn removing_a_middle_neuron_keeps_survivor_weights_aligned() {
    let mut engine = Engine::seeded(&EngineConfig::new(2, 1, vec![4], 1), 5).unwrap();
    let before: Vec<Vec<f64>> = (0..2)
        .map(|i| engine.neuron(0, i).unwrap().weights_out.clone())
        .collect();
    let survivor = engine.neuron(1, 2).unwrap().clone();

    engine.remove_neuron(1, 1).unwrap();

    for (i, old) in before.iter().enumerate() {
        let expected = vec![old[0], old[2], old[3]];
        assert_eq!(engine.neuron(0, i).unwrap().weights_out, expected);
    }
    assert_eq!(engine.neuron(1, 1).unwrap(), &survivor);
}

#[test]
fn add_then_remove_layer_restores_shape() {
    let config = EngineConfig::new(3, 1, vec![4], 2);
    for at in 1..=2 {
        let mut engine = Engine::seeded(&config, 2).unwrap();
        let sizes = engine.layer_sizes();
        let out_degree = engine.neuron(at - 1, 0).unwrap().weights_out.len();

        engine.add_layer(at, 6, true).unwrap();
        assert_eq!(engine.layer_sizes().len(), sizes.len() + 1);
        engine.remove_layer(at, true).unwrap();

        assert_eq!(engine.layer_sizes(), sizes);
        assert_eq!(engine.neuron(at - 1, 0).unwrap().weights_out.len(), out_degree);
    }
}

#[test]
fn removing_the_only_neuron_is_refused() {
    let mut engine = Engine::seeded(&EngineConfig::new(2, 1, vec![1], 1), 4).unwrap();
    let snapshot = engine.network().clone();

    for layer in [1, 2] {
        let err = engine.remove_neuron(layer, 0).unwrap_err();
        assert!(matches!(err, NetError::LastNeuron { .. }));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
    assert_eq!(engine.network(), &snapshot);
}

#[test]
fn input_and_output_layers_cannot_be_added_or_removed() {
    let mut engine = Engine::zeroed(&EngineConfig::new(2, 1, vec![2], 1)).unwrap();
    let last = engine.layer_sizes().len() - 1;
    assert!(engine.add_layer(0, 2, true).is_err());
    assert!(engine.add_layer(last + 1, 2, true).is_err());
    assert!(engine.remove_layer(0, true).is_err());
    assert!(engine.remove_layer(last, true).is_err());
    assert_eq!(engine.layer_sizes(), vec![2, 2, 1]);
}

#[test]
fn unseeded_edits_stay_zero() {
    let mut engine = Engine::zeroed(&EngineConfig::new(2, 1, vec![2], 1)).unwrap();
    engine.add_neuron(0).unwrap();
    engine.add_neuron(1).unwrap();
    engine.add_layer(2, 3, true).unwrap();
    for layer in engine.network().layers() {
        for neuron in &layer.neurons {
            assert_eq!(neuron.bias, 0.0);
            assert!(neuron.weights_out.iter().all(|&w| w == 0.0));
        }
    }
}
