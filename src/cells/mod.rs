//! # Step Units
//!
//! A step unit advances one timestep: it takes the previous state and the
//! current input and returns the new state and an output. Units are driven by
//! the processors in [`crate::rnn`]; implement [`StepUnit`] to plug in your own.
//!
//! ## Built-in Units
//!
//! | Unit | State | Output |
//! |------|-------|--------|
//! | [`CfCCell`] | `[batch, hidden]` | `[batch, hidden]` |
//! | [`LSTMCell`] | `([batch, hidden], [batch, hidden])` | `h`, `[batch, hidden]` |
//!
//! ## CfC Operating Modes
//!
//! ### Default Mode (Recommended)
//! ```text
//! h = tanh(ff1) × (1 - σ(t)) + tanh(ff2) × σ(t)
//! ```
//!
//! ### Pure Mode
//! ```text
//! h = a - a × exp(-t × (|w_τ| + |ff1|)) × ff1
//! ```
//!
//! ### NoGate Mode
//! ```text
//! h = tanh(ff1) + tanh(ff2) × σ(t)
//! ```
//!
//! ## Writing a Unit
//!
//! ```ignore
//! struct RunningSum;
//!
//! impl<B: Backend> StepUnit<B> for RunningSum {
//!     type State = Tensor<B, 2>;
//!
//!     fn input_size(&self) -> usize { 1 }
//!     fn output_size(&self) -> usize { 1 }
//!     fn init_state(&self, batch: usize, device: &B::Device) -> Self::State {
//!         Tensor::zeros([batch, 1], device)
//!     }
//!     fn step(&self, state: Self::State, input: Tensor<B, 2>) -> (Self::State, Tensor<B, 2>) {
//!         let sum = state + input;
//!         (sum.clone(), sum)
//!     }
//!     fn fresh_clone(&self) -> Self { RunningSum }
//! }
//! ```

pub mod cfc_cell;
pub mod lstm_cell;
pub mod unit;

pub use cfc_cell::{CfCCell, CfcMode};
pub use lstm_cell::LSTMCell;
pub use unit::StepUnit;
