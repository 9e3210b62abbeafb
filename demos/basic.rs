//! Basic usage example of a bidirectional encoder
//!
//! Builds bidirectional layers over CfC and LSTM cells and shows the output
//! shapes for batch-first and sequence-first input.

use birnn::prelude::*;
use burn::backend::NdArray;
use burn::tensor::Tensor;

fn main() -> Result<()> {
    println!("=== Bidirectional Basic Example ===\n");

    // Use the NdArray backend (CPU)
    type Backend = NdArray<f32>;
    let device = Default::default();

    // Example 1: CfC in both directions, batch-first by default
    println!("Example 1: Batch-first sequence");
    let mut encoder = Bidirectional::new(CfCCell::<Backend>::new(20, 50, &device))?;

    println!("Created bidirectional CfC encoder:");
    println!("  Input size:  {}", encoder.input_size());
    println!("  Output size: {} (forward 50 + backward 50)", encoder.output_size());
    println!();

    // Input shape: [batch=4, seq=10, features=20]
    let input = Tensor::<Backend, 3>::random(
        [4, 10, 20],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let output = encoder.forward(input)?;

    println!("  Input shape:  [4, 10, 20]");
    println!("  Output shape: {:?}", output.dims());
    println!();

    // Example 2: LSTM, sequence-first, summing the two directions
    println!("Example 2: Sequence-first, summed directions");
    let mut summed = Bidirectional::from_parts(LSTMCell::<Backend>::new(20, 32, &device), None, Sum)?
        .with_batch_first(false);

    // Input shape: [seq=10, batch=2, features=20]
    let input_seq = Tensor::<Backend, 3>::random(
        [10, 2, 20],
        burn::tensor::Distribution::Uniform(-1.0, 1.0),
        &device,
    );
    let output_seq = summed.forward(input_seq)?;

    println!("  Input shape:  [10, 2, 20]");
    println!("  Output shape: {:?}", output_seq.dims());
    println!();

    // Example 3: Step-level API
    println!("Example 3: Vec of [batch, features] steps");
    let steps = vec![Tensor::<Backend, 2>::ones([1, 20], &device); 3];
    let outputs = encoder.process(steps)?;

    println!("  Steps in:  3");
    println!("  Steps out: {}", outputs.len());
    println!("  Step shape: {:?}", outputs[0].dims());

    println!("\n=== Example completed! ===");
    Ok(())
}
