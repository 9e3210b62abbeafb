//! Stateful Step Processor
//!
//! Runs a [`StepUnit`] over a whole sequence, threading state from step to step
//! and, in remember mode, from one call to the next.

use crate::cells::unit::{validate_unit, StepUnit};
use crate::error::Result;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

/// Training or inference regime of a processor
///
/// In [`Mode::Train`] state always resets at the start of a call, whatever the
/// remember flag says: a truncated backprop window must not silently reach
/// into the previous call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Mode {
    /// Gradient-producing calls; state never carries across calls
    Train,
    /// Inference; state carries across calls when remembering
    #[default]
    Eval,
}

/// Sequence processor wrapping a single-step recurrent unit
///
/// # Type Parameters
/// * `B` - The backend type
/// * `U` - The step unit
pub struct StepProcessor<B: Backend, U: StepUnit<B>> {
    unit: U,
    /// `None` means "initial state", materialized on the next step
    state: Option<U::State>,
    remember: bool,
    mode: Mode,
    _backend: PhantomData<B>,
}

impl<B: Backend, U: StepUnit<B> + fmt::Debug> fmt::Debug for StepProcessor<B, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepProcessor")
            .field("unit", &self.unit)
            .field("has_state", &self.state.is_some())
            .field("remember", &self.remember)
            .field("mode", &self.mode)
            .finish()
    }
}

impl<B: Backend, U: StepUnit<B>> StepProcessor<B, U> {
    /// Wrap a step unit
    ///
    /// # Errors
    /// [`BiRnnError::InvalidUnit`](crate::BiRnnError::InvalidUnit) if the unit
    /// reports a zero input or output width.
    pub fn new(unit: U) -> Result<Self> {
        validate_unit(&unit, "step")?;
        Ok(Self {
            unit,
            state: None,
            remember: false,
            mode: Mode::default(),
            _backend: PhantomData,
        })
    }

    /// Get the wrapped unit
    pub fn unit(&self) -> &U {
        &self.unit
    }

    /// Consume the processor, returning the wrapped unit
    pub fn into_unit(self) -> U {
        self.unit
    }

    /// Current recurrent state, `None` if the next call starts fresh
    pub fn state(&self) -> Option<&U::State> {
        self.state.as_ref()
    }

    /// Whether state persists across calls (in eval mode)
    pub fn is_remembering(&self) -> bool {
        self.remember
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Set whether state persists across `process` calls (default: false)
    pub fn remember(&mut self, remember: bool) {
        self.remember = remember;
    }

    /// Drop the current state; the next step starts from the unit's initial state
    pub fn forget(&mut self) {
        self.state = None;
    }

    /// Switch the processor to training mode
    pub fn train(&mut self) {
        self.mode = Mode::Train;
    }

    /// Switch the processor to evaluation mode
    pub fn eval(&mut self) {
        self.mode = Mode::Eval;
    }

    /// Set the mode directly
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Whether the next `process` call starts from the initial state
    pub fn resets_on_call(&self) -> bool {
        !self.remember || self.mode == Mode::Train
    }

    /// Run the unit over every step of `sequence`, in order
    ///
    /// # Arguments
    /// * `sequence` - Steps of shape `[batch, input_size]`
    ///
    /// # Returns
    /// One output per step, shape `[batch, output_size]`
    pub fn process(&mut self, sequence: Vec<Tensor<B, 2>>) -> Vec<Tensor<B, 2>> {
        let reset = self.resets_on_call();
        if reset {
            self.state = None;
        }
        trace!(steps = sequence.len(), reset, "processing sequence");

        let mut outputs = Vec::with_capacity(sequence.len());
        for input in sequence {
            let state = match self.state.take() {
                Some(state) => state,
                None => {
                    let batch_size = input.dims()[0];
                    self.unit.init_state(batch_size, &input.device())
                }
            };

            let (new_state, output) = self.unit.step(state, input);
            self.state = Some(new_state);
            outputs.push(output);
        }
        outputs
    }
}
