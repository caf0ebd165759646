//! Full-tensor min/max reduction

use calibrar_common::{CalibrarError, Result};
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;
use tracing::trace;

use crate::quant::types::ValueRange;

/// Global minimum and maximum of a 2-D tensor.
///
/// The fold is seeded with element `(0, 0)`. NaN elements are skipped
/// (`f32::min`/`f32::max` return the non-NaN operand), so a tensor made
/// only of NaN reduces to a NaN range.
///
/// # Errors
///
/// [`CalibrarError::EmptyTensor`] if the tensor has no elements.
pub fn reduce(tensor: ArrayView2<'_, f32>) -> Result<ValueRange> {
    let seed = first_element(&tensor)?;
    let range = fold_values(tensor.iter().copied(), seed_range(seed));

    trace!(
        rows = tensor.nrows(),
        cols = tensor.ncols(),
        min = range.min,
        max = range.max,
        "reduced tensor range"
    );
    Ok(range)
}

/// Same result as [`reduce`], with rows folded on the rayon pool and
/// combined with [`ValueRange::union`].
pub fn par_reduce(tensor: ArrayView2<'_, f32>) -> Result<ValueRange> {
    let seed = seed_range(first_element(&tensor)?);

    let rows: Vec<ArrayView1<'_, f32>> = tensor.outer_iter().collect();
    let range = rows
        .par_iter()
        .map(|row| fold_values(row.iter().copied(), seed))
        .reduce(|| seed, ValueRange::union);

    trace!(
        rows = tensor.nrows(),
        cols = tensor.ncols(),
        min = range.min,
        max = range.max,
        "reduced tensor range in parallel"
    );
    Ok(range)
}

fn first_element(tensor: &ArrayView2<'_, f32>) -> Result<f32> {
    let (rows, cols) = tensor.dim();
    tensor
        .first()
        .copied()
        .ok_or(CalibrarError::EmptyTensor { rows, cols })
}

fn seed_range(seed: f32) -> ValueRange {
    ValueRange::new(seed, seed)
}

fn fold_values(values: impl Iterator<Item = f32>, init: ValueRange) -> ValueRange {
    values.fold(init, |acc, v| ValueRange {
        min: acc.min.min(v),
        max: acc.max.max(v),
    })
}
