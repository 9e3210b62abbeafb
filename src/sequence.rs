//! Sequence reordering helpers
//!
//! The backward pass of a bidirectional encoder runs over the input in reverse
//! time order and has its outputs reversed again so they line up with the
//! forward outputs. These helpers work on plain `Vec`s and never look at the
//! elements, so they are shared by tensors, pairs, and test values alike.

use crate::error::{BiRnnError, Result};

/// Reverse the time order of a sequence.
///
/// `reverse(seq)[i] == seq[n - 1 - i]`. Applying it twice yields the original
/// sequence.
pub fn reverse<T>(mut seq: Vec<T>) -> Vec<T> {
    seq.reverse();
    seq
}

/// Pair two sequences step-for-step.
///
/// # Errors
/// [`BiRnnError::LengthMismatch`] if the sequences differ in length.
pub fn zip<L, R>(left: Vec<L>, right: Vec<R>) -> Result<Vec<(L, R)>> {
    if left.len() != right.len() {
        return Err(BiRnnError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left.into_iter().zip(right).collect())
}
