use crate::error::{BiRnnError, Result};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Single-timestep recurrent unit driven by a [`StepProcessor`](crate::rnn::StepProcessor)
///
/// A unit is a pure step function over an explicit state value: the processor
/// owns the state, hands it to [`step`](StepUnit::step), and stores what comes
/// back. The unit itself holds only parameters.
///
/// # Type Parameters
/// * `B` - The backend type
pub trait StepUnit<B: Backend>: Sized {
    /// Recurrent state threaded between steps (e.g. a hidden tensor, or `(h, c)`)
    type State: Clone;

    /// Number of input features per step
    fn input_size(&self) -> usize;

    /// Number of output features per step
    fn output_size(&self) -> usize;

    /// Initial state for a batch of `batch_size` sequences
    fn init_state(&self, batch_size: usize, device: &B::Device) -> Self::State;

    /// Advance one timestep
    ///
    /// # Arguments
    /// * `state` - State after the previous step
    /// * `input` - Input of shape `[batch, input_size]`
    ///
    /// # Returns
    /// Tuple of (new_state, output) where output is `[batch, output_size]`
    fn step(&self, state: Self::State, input: Tensor<B, 2>) -> (Self::State, Tensor<B, 2>);

    /// Structurally identical unit with freshly initialized parameters
    ///
    /// Used to build the backward partner of a forward unit, so the two
    /// directions never share learned parameters.
    fn fresh_clone(&self) -> Self;
}

/// Check the capabilities a processor relies on before any step runs.
pub(crate) fn validate_unit<B: Backend, U: StepUnit<B>>(unit: &U, role: &str) -> Result<()> {
    if unit.input_size() == 0 {
        return Err(BiRnnError::invalid_unit(format!(
            "{role} unit has zero input size"
        )));
    }
    if unit.output_size() == 0 {
        return Err(BiRnnError::invalid_unit(format!(
            "{role} unit has zero output size"
        )));
    }
    Ok(())
}
