//! Streaming Example
//!
//! Encodes a long sequence in bounded chunks with `remember(true)`, then starts
//! a second stream after `forget()`. Run with `RUST_LOG=birnn=trace` to see the
//! per-call state decisions.

use birnn::prelude::*;
use burn::backend::NdArray;
use burn::tensor::Tensor;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Chunked Streaming Example ===\n");

    type Backend = NdArray<f32>;
    let device = Default::default();

    let config = BidirectionalConfig::default().with_remember(true);
    let mut encoder = Bidirectional::from_config(CfCCell::<Backend>::new(8, 16, &device), None, &config)?;
    encoder.eval();

    let chunk_len = 25;
    let chunks = 4;
    println!("Encoding {} chunks of {} steps", chunks, chunk_len);

    for chunk in 0..chunks {
        let input = Tensor::<Backend, 3>::random(
            [2, chunk_len, 8],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let output = encoder.forward(input)?;
        println!("  chunk {}: output {:?}", chunk, output.dims());
    }
    println!();

    // Training calls always start from a clean state
    encoder.train();
    println!("Mode: {:?} (state resets every call)", encoder.mode());
    encoder.eval();

    encoder.forget();
    println!("State cleared; next stream starts fresh");
    println!(
        "  forward state present:  {}",
        encoder.forward_processor().state().is_some()
    );
    println!(
        "  backward state present: {}",
        encoder.backward_processor().state().is_some()
    );

    println!("\n=== Streaming Example completed! ===");
    Ok(())
}
