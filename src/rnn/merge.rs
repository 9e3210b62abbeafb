//! Merge stage: combining aligned forward and backward outputs
//!
//! A [`Combiner`] turns one `(forward, backward)` pair into a single step
//! value. [`Concat`] is the default; any type implementing the trait can be
//! plugged into [`Bidirectional::from_parts`](super::Bidirectional::from_parts).

use super::processor::Mode;
use crate::error::{BiRnnError, Result};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use tracing::debug;

/// Per-timestep combination of forward and backward outputs
pub trait Combiner<B: Backend> {
    /// Combine a forward output with the backward output for the same timestep
    fn combine(&self, forward: Tensor<B, 2>, backward: Tensor<B, 2>) -> Tensor<B, 2>;

    /// Shape of the merged value for the given input shapes
    ///
    /// Called once at construction with `[1, output_size]` shapes so that an
    /// unusable combination is rejected before any step runs.
    ///
    /// # Errors
    /// [`BiRnnError::InvalidUnit`] if the shapes cannot be combined.
    fn merged_shape(&self, forward: [usize; 2], backward: [usize; 2]) -> Result<[usize; 2]>;
}

/// Concatenation along one tensor axis
///
/// Axis 1 (the default) concatenates features: `[batch, f] + [batch, b] ->
/// [batch, f + b]`. Axis 0 stacks the two directions along the batch axis and
/// requires equal feature widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Concat {
    axis: usize,
}

impl Concat {
    /// Feature axis of a `[batch, features]` step value
    pub const FEATURE_AXIS: usize = 1;

    /// Concatenate along `axis`
    pub fn along(axis: usize) -> Self {
        Self { axis }
    }

    /// Concatenation axis
    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl Default for Concat {
    fn default() -> Self {
        Self::along(Self::FEATURE_AXIS)
    }
}

impl From<usize> for Concat {
    fn from(axis: usize) -> Self {
        Self::along(axis)
    }
}

impl<B: Backend> Combiner<B> for Concat {
    fn combine(&self, forward: Tensor<B, 2>, backward: Tensor<B, 2>) -> Tensor<B, 2> {
        Tensor::cat(vec![forward, backward], self.axis)
    }

    fn merged_shape(&self, forward: [usize; 2], backward: [usize; 2]) -> Result<[usize; 2]> {
        let other = match self.axis {
            0 => 1,
            1 => 0,
            axis => {
                return Err(BiRnnError::invalid_unit(format!(
                    "concat axis {axis} out of range for [batch, features] steps"
                )))
            }
        };
        if forward[other] != backward[other] {
            return Err(BiRnnError::invalid_unit(format!(
                "cannot concat {forward:?} and {backward:?} along axis {}",
                self.axis
            )));
        }
        let mut shape = forward;
        shape[self.axis] += backward[self.axis];
        Ok(shape)
    }
}

/// Element-wise sum of both directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Sum;

impl<B: Backend> Combiner<B> for Sum {
    fn combine(&self, forward: Tensor<B, 2>, backward: Tensor<B, 2>) -> Tensor<B, 2> {
        forward + backward
    }

    fn merged_shape(&self, forward: [usize; 2], backward: [usize; 2]) -> Result<[usize; 2]> {
        if forward != backward {
            return Err(BiRnnError::invalid_unit(format!(
                "cannot sum {forward:?} and {backward:?}"
            )));
        }
        Ok(forward)
    }
}

/// Processor for the merge stage
///
/// Mirrors the remember/forget/mode surface of a
/// [`StepProcessor`](super::StepProcessor) so the orchestrator can propagate
/// those calls to all three stages alike. The combiner itself holds no state.
#[derive(Debug, Clone)]
pub struct MergeProcessor<C> {
    combiner: C,
    remember: bool,
    mode: Mode,
}

impl<C> MergeProcessor<C> {
    /// Wrap a combiner
    pub fn new(combiner: C) -> Self {
        Self {
            combiner,
            remember: false,
            mode: Mode::default(),
        }
    }

    /// Get the wrapped combiner
    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    /// Whether the merge stage is flagged to remember
    pub fn is_remembering(&self) -> bool {
        self.remember
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Record the remember flag
    pub fn remember(&mut self, remember: bool) {
        self.remember = remember;
    }

    /// No-op for a stateless combiner
    pub fn forget(&mut self) {
        debug!("merge stage has no state to forget");
    }

    /// Set the mode
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Merge each (forward, backward) pair, in order
    pub fn process<B: Backend>(&self, pairs: Vec<(Tensor<B, 2>, Tensor<B, 2>)>) -> Vec<Tensor<B, 2>>
    where
        C: Combiner<B>,
    {
        pairs
            .into_iter()
            .map(|(forward, backward)| self.combiner.combine(forward, backward))
            .collect()
    }
}
