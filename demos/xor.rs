use plastic_nn::{train_network, Engine, EngineConfig};

fn main() -> plastic_nn::Result<()> {
    // Starts with no hidden layer, which cannot represent XOR.
    let config = EngineConfig::new(2, 0, vec![], 1).with_learning_rate(0.5);
    let mut network = Engine::seeded(&config, 7)?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 10000;

    for epoch in 0..epochs {
        if epoch == 2000 {
            network.add_layer(1, 4, true)?;
            println!("Grew a hidden layer: {:?}", network.layer_sizes());
        }
        let loss = train_network(&mut network, &inputs, &expected_outputs)?;
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)?[0]);
    }
    Ok(())
}
