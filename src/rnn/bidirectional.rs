//! Bidirectional RNN Layer
//!
//! Runs one step unit over a sequence in time order and an independent partner
//! over the same sequence in reverse, realigns the backward outputs with the
//! original timeline, and merges the two directions step by step.

use super::merge::{Combiner, Concat, MergeProcessor};
use super::processor::{Mode, StepProcessor};
use crate::cells::unit::{validate_unit, StepUnit};
use crate::error::{BiRnnError, Result};
use crate::sequence::{reverse, zip};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Serializable settings for a [`Bidirectional`] layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BidirectionalConfig {
    /// Carry recurrent state across calls (eval mode only)
    pub remember: bool,
    /// Train or eval regime
    pub mode: Mode,
    /// Layout of 3D inputs: `[batch, seq, features]` when true, else `[seq, batch, features]`
    pub batch_first: bool,
    /// Axis along which forward and backward outputs are concatenated
    pub concat_axis: usize,
}

impl Default for BidirectionalConfig {
    fn default() -> Self {
        Self {
            remember: false,
            mode: Mode::default(),
            batch_first: true,
            concat_axis: Concat::FEATURE_AXIS,
        }
    }
}

impl BidirectionalConfig {
    /// Set the remember flag (default: false)
    pub fn with_remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    /// Set the mode (default: eval)
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether 3D input is batch-first (default: true)
    pub fn with_batch_first(mut self, batch_first: bool) -> Self {
        self.batch_first = batch_first;
        self
    }

    /// Set the concatenation axis (default: 1, the feature axis)
    pub fn with_concat_axis(mut self, concat_axis: usize) -> Self {
        self.concat_axis = concat_axis;
        self
    }
}

/// Bidirectional RNN Layer
///
/// Output step `t` sees inputs `0..=t` through the forward unit and inputs
/// `t..T` through the backward unit.
///
/// # Type Parameters
/// * `B` - The backend type
/// * `U` - The step unit used in both directions
/// * `C` - The merge function (defaults to feature concatenation)
pub struct Bidirectional<B: Backend, U: StepUnit<B>, C: Combiner<B> = Concat> {
    fwd: StepProcessor<B, U>,
    bwd: StepProcessor<B, U>,
    merge: MergeProcessor<C>,
    remember: bool,
    mode: Mode,
    batch_first: bool,
}

impl<B: Backend, U: StepUnit<B>> Bidirectional<B, U, Concat> {
    /// Create a layer whose backward unit is a fresh clone of `forward`,
    /// merging by feature concatenation
    ///
    /// # Errors
    /// [`BiRnnError::InvalidUnit`] if the unit fails validation.
    pub fn new(forward: U) -> Result<Self> {
        Self::from_parts(forward, None, Concat::default())
    }

    /// Create a layer from a forward unit, an optional backward unit, and a config
    ///
    /// # Errors
    /// [`BiRnnError::InvalidUnit`] if a unit fails validation or the config's
    /// concatenation axis cannot merge the two outputs.
    pub fn from_config(forward: U, backward: Option<U>, config: &BidirectionalConfig) -> Result<Self> {
        let mut layer = Self::from_parts(forward, backward, Concat::along(config.concat_axis))?;
        layer.remember(config.remember);
        layer.set_mode(config.mode);
        Ok(layer.with_batch_first(config.batch_first))
    }
}

impl<B: Backend, U: StepUnit<B>, C: Combiner<B>> Bidirectional<B, U, C> {
    /// Create a layer from its parts
    ///
    /// # Arguments
    /// * `forward` - Unit run in time order
    /// * `backward` - Unit run in reverse time order; `None` builds one with
    ///   [`StepUnit::fresh_clone`] so the directions never share parameters
    /// * `merge` - Combiner applied to every aligned pair
    ///
    /// # Errors
    /// [`BiRnnError::InvalidUnit`] if either unit fails validation, the input
    /// widths differ, or `merge` rejects the two output shapes.
    pub fn from_parts(forward: U, backward: Option<U>, merge: C) -> Result<Self> {
        validate_unit(&forward, "forward")?;
        let backward = backward.unwrap_or_else(|| forward.fresh_clone());
        validate_unit(&backward, "backward")?;

        if forward.input_size() != backward.input_size() {
            return Err(BiRnnError::invalid_unit(format!(
                "backward input size {} != forward input size {}",
                backward.input_size(),
                forward.input_size()
            )));
        }
        let merged = merge.merged_shape([1, forward.output_size()], [1, backward.output_size()])?;

        debug!(
            input_size = forward.input_size(),
            forward_size = forward.output_size(),
            backward_size = backward.output_size(),
            merged_size = merged[1],
            "built bidirectional layer"
        );

        Ok(Self {
            fwd: StepProcessor::new(forward)?,
            bwd: StepProcessor::new(backward)?,
            merge: MergeProcessor::new(merge),
            remember: false,
            mode: Mode::default(),
            batch_first: true,
        })
    }

    /// Set whether 3D input is batch-first (default: true)
    ///
    /// When true: input shape is `[batch, seq, features]`
    /// When false: input shape is `[seq, batch, features]`
    pub fn with_batch_first(mut self, batch_first: bool) -> Self {
        self.batch_first = batch_first;
        self
    }

    /// Get input size
    pub fn input_size(&self) -> usize {
        self.fwd.unit().input_size()
    }

    /// Get merged output size (features per step)
    pub fn output_size(&self) -> usize {
        self.merged_shape(1).map(|shape| shape[1]).unwrap_or(0)
    }

    /// Whether state persists across calls
    pub fn is_remembering(&self) -> bool {
        self.remember
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Processor running in time order
    pub fn forward_processor(&self) -> &StepProcessor<B, U> {
        &self.fwd
    }

    /// Processor running in reverse time order
    pub fn backward_processor(&self) -> &StepProcessor<B, U> {
        &self.bwd
    }

    /// Merge stage
    pub fn merge_processor(&self) -> &MergeProcessor<C> {
        &self.merge
    }

    /// Set whether state persists across calls; applied to all three stages
    pub fn remember(&mut self, remember: bool) {
        debug!(remember, "bidirectional remember");
        self.remember = remember;
        self.fwd.remember(remember);
        self.bwd.remember(remember);
        self.merge.remember(remember);
    }

    /// Reset the state of all three stages
    pub fn forget(&mut self) {
        debug!("bidirectional forget");
        self.fwd.forget();
        self.bwd.forget();
        self.merge.forget();
    }

    /// Switch all three stages to training mode
    pub fn train(&mut self) {
        self.set_mode(Mode::Train);
    }

    /// Switch all three stages to evaluation mode
    pub fn eval(&mut self) {
        self.set_mode(Mode::Eval);
    }

    /// Set the mode of all three stages
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(?mode, "bidirectional mode");
        self.mode = mode;
        self.fwd.set_mode(mode);
        self.bwd.set_mode(mode);
        self.merge.set_mode(mode);
    }

    /// Encode a sequence of steps
    ///
    /// # Arguments
    /// * `sequence` - Steps of shape `[batch, input_size]`
    ///
    /// # Returns
    /// One merged output per input step, in the original time order
    ///
    /// # Errors
    /// [`BiRnnError::LengthMismatch`] if a unit's processor produced a different
    /// number of outputs for the two directions. Processor state touched by a
    /// failed call should be cleared with [`forget`](Self::forget).
    pub fn process(&mut self, sequence: Vec<Tensor<B, 2>>) -> Result<Vec<Tensor<B, 2>>> {
        let seq_len = sequence.len();
        trace!(seq_len, "bidirectional process");

        let forward_out = self.fwd.process(sequence.clone());
        let backward_out = reverse(self.bwd.process(reverse(sequence)));

        let pairs = zip(forward_out, backward_out)?;
        Ok(self.merge.process(pairs))
    }

    /// Encode a 3D tensor
    ///
    /// # Arguments
    /// * `input` - `[batch, seq, features]` if batch_first, else `[seq, batch, features]`
    ///
    /// # Returns
    /// `[merged_batch, seq, merged_features]`; with the default merge this is
    /// `[batch, seq, forward_size + backward_size]`
    pub fn forward(&mut self, input: Tensor<B, 3>) -> Result<Tensor<B, 3>> {
        let device = input.device();
        let [d0, d1, _] = input.dims();
        let (batch_size, seq_len, time_axis) = if self.batch_first {
            (d0, d1, 1)
        } else {
            (d1, d0, 0)
        };

        let steps: Vec<Tensor<B, 2>> = (0..seq_len)
            .map(|t| input.clone().narrow(time_axis, t, 1).squeeze(time_axis))
            .collect();

        let outputs = self.process(steps)?;
        if outputs.is_empty() {
            let [merged_batch, merged_features] = self.merged_shape(batch_size)?;
            return Ok(Tensor::zeros([merged_batch, 0, merged_features], &device));
        }
        Ok(Tensor::stack(outputs, 1))
    }

    fn merged_shape(&self, batch_size: usize) -> Result<[usize; 2]> {
        self.merge.combiner().merged_shape(
            [batch_size, self.fwd.unit().output_size()],
            [batch_size, self.bwd.unit().output_size()],
        )
    }
}

impl<B, U, C> fmt::Debug for Bidirectional<B, U, C>
where
    B: Backend,
    U: StepUnit<B> + fmt::Debug,
    C: Combiner<B> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bidirectional")
            .field("forward", &self.fwd)
            .field("backward", &self.bwd)
            .field("merge", &self.merge)
            .field("remember", &self.remember)
            .field("mode", &self.mode)
            .field("batch_first", &self.batch_first)
            .finish()
    }
}
