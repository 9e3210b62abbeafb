//! # Sequence Processing
//!
//! This module turns single-step units into sequence encoders. **[`Bidirectional`]
//! is the primary API most users should use.**
//!
//! ## Pipeline
//!
//! ```text
//!             ┌─────────────── forward processor ───────────────┐
//! X[0..T] ───►│ step(X[0]) → step(X[1]) → … → step(X[T-1])      │── f[0..T] ─┐
//!     │       └─────────────────────────────────────────────────┘            │
//!     │ reverse                                                               zip ─► merge ─► Y[0..T]
//!     ▼       ┌─────────────── backward processor ──────────────┐            │
//! X[T-1..0] ─►│ step(X[T-1]) → … → step(X[0])                   │─ reverse ─┘
//!             └─────────────────────────────────────────────────┘
//! ```
//!
//! `Y[t]` combines `f[t]`, which has seen `X[0..=t]`, with `b[t]`, which has
//! seen `X[t..T]`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use birnn::prelude::*;
//! use burn::tensor::Tensor;
//!
//! let cell = CfCCell::<Backend>::new(16, 32, &device);
//! let mut encoder = Bidirectional::new(cell)?;
//!
//! // [batch=4, seq_len=10, features=16]
//! let input: Tensor<Backend, 3> = Tensor::zeros([4, 10, 16], &device);
//! let output = encoder.forward(input)?;
//! // output: [4, 10, 64] - forward and backward outputs side by side
//! ```
//!
//! ## Tensor Shapes
//!
//! | Format | Shape | Default |
//! |--------|-------|---------|
//! | Batch-first | `[batch, seq_len, features]` | ✓ Yes |
//! | Sequence-first | `[seq_len, batch, features]` | No |
//!
//! [`Bidirectional::process`] takes the same data as a `Vec` of
//! `[batch, features]` steps.
//!
//! ## State Across Calls
//!
//! | Mode | `remember(false)` (default) | `remember(true)` |
//! |------|-----------------------------|------------------|
//! | [`Mode::Eval`] | reset every call | carried into the next call |
//! | [`Mode::Train`] | reset every call | reset every call |
//!
//! ```ignore
//! encoder.eval();
//! encoder.remember(true);
//! for chunk in chunks {
//!     let out = encoder.process(chunk)?; // state flows from chunk to chunk
//! }
//! encoder.forget(); // next stream starts clean
//! ```
//!
//! ## Merging
//!
//! | Combiner | Result for `[batch, f]` + `[batch, b]` |
//! |----------|----------------------------------------|
//! | [`Concat`] (default, axis 1) | `[batch, f + b]` |
//! | `Concat::from(0)` | `[2 * batch, f]` (requires `f == b`) |
//! | [`Sum`] | `[batch, f]` (requires `f == b`) |

pub mod bidirectional;
pub mod merge;
pub mod processor;

pub use bidirectional::{Bidirectional, BidirectionalConfig};
pub use merge::{Combiner, Concat, MergeProcessor, Sum};
pub use processor::{Mode, StepProcessor};
