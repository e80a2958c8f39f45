use ffnet::{train_network, Network, NetworkConfig, TrainingItem};

fn main() -> ffnet::Result<()> {
    // 2 inputs → 1 hidden layer of 4 → 1 output.
    let mut network = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 7)?;

    // Sigmoid units without biases cannot separate an all-zero input, so the
    // inputs are lifted off zero the same way image pixels are.
    let items = vec![
        TrainingItem::new(vec![0.99, 0.01], vec![0.99]),
        TrainingItem::new(vec![0.99, 0.99], vec![0.01]),
        TrainingItem::new(vec![0.01, 0.99], vec![0.99]),
        TrainingItem::new(vec![0.01, 0.01], vec![0.01]),
    ];

    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_network(&mut network, &items)?;
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for item in &items {
        println!("Input: {:?} -> Output: {:.4}", item.input(), network.predict(item.input())?[0]);
    }
    Ok(())
}
