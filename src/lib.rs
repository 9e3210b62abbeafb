//! # birnn - Bidirectional recurrent encoders (Rust)
//!
//! Bidirectional sequence encoding on the Burn framework.
//!
//! ## Features
//!
//! - **Bidirectional**: forward and backward passes realigned and merged per timestep
//! - **Pluggable units**: any [`StepUnit`](cells::StepUnit); CfC and LSTM cells included
//! - **Pluggable merge**: feature concatenation (default), batch concatenation, sum, or custom
//! - **Streaming**: `remember` carries state across chunks in eval mode; `forget` resets it
//!
//! ## Quick Start
//!
//! ```rust
//! use birnn::sequence::{reverse, zip};
//!
//! let steps = vec![1, 2, 3];
//! let backward = reverse(steps.clone());
//! assert_eq!(reverse(backward.clone()), steps);
//!
//! let pairs = zip(steps, reverse(backward)).unwrap();
//! assert_eq!(pairs, vec![(1, 1), (2, 2), (3, 3)]);
//! ```
//!
//! ## Layer-level Usage
//!
//! ```ignore
//! use birnn::prelude::*;
//!
//! let cell = LSTMCell::<Backend>::new(16, 32, &device);
//! let mut encoder = Bidirectional::new(cell)?;
//! let output = encoder.forward(input)?; // [batch, seq, 64]
//! ```

pub mod cells;
pub mod error;
pub mod rnn;
pub mod sequence;

pub use error::{BiRnnError, Result};

pub mod prelude {
    pub use crate::cells::{CfCCell, CfcMode, LSTMCell, StepUnit};
    pub use crate::error::{BiRnnError, Result};
    pub use crate::rnn::{
        Bidirectional, BidirectionalConfig, Combiner, Concat, Mode, StepProcessor, Sum,
    };
}
