//! Range reduction
//!
//! Computes the observed extent of tensor values:
//! - `reduce` / `par_reduce`: global min/max of a single 2-D tensor
//! - `RangeObserver`: running min/max or moving average over batches

mod observer;
mod reduce;


pub use observer::{is_valid_momentum, ObserverMethod, RangeObserver};
pub use reduce::{par_reduce, reduce};
