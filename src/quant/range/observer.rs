//! Running range statistics over multiple batches

use calibrar_common::{CalibrarError, Result};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::reduce::reduce;
use crate::quant::calibration::calibrate;
use crate::quant::types::{CodeRange, QuantizationParameters, ValueRange};

/// How successive batch ranges are combined
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ObserverMethod {
    /// Global min/max over every observed batch
    #[default]
    MinMax,
    /// Exponential moving average of batch bounds
    MovingAverage {
        /// Weight of the newest batch, in `(0, 1]`
        momentum: f32,
    },
}

/// Moving-average momentum must lie in `(0, 1]`; NaN is rejected
pub fn is_valid_momentum(momentum: f32) -> bool {
    momentum > 0.0 && momentum <= 1.0
}

impl ObserverMethod {
    pub fn validate(&self) -> Result<()> {
        if let Self::MovingAverage { momentum } = *self {
            if !is_valid_momentum(momentum) {
                return Err(CalibrarError::invalid_argument(
                    "momentum",
                    format!("{momentum} is outside (0, 1]"),
                ));
            }
        }
        Ok(())
    }
}

/// Accumulates a [`ValueRange`] across batches and calibrates from it
#[derive(Clone, Debug)]
pub struct RangeObserver {
    method: ObserverMethod,
    running: Option<ValueRange>,
    num_batches: usize,
}

impl RangeObserver {
    pub fn new(method: ObserverMethod) -> Result<Self> {
        method.validate()?;
        Ok(Self {
            method,
            running: None,
            num_batches: 0,
        })
    }

    /// Observer tracking the global min/max
    pub fn min_max() -> Self {
        Self {
            method: ObserverMethod::MinMax,
            running: None,
            num_batches: 0,
        }
    }

    /// Observer smoothing batch bounds with `momentum`
    pub fn moving_average(momentum: f32) -> Result<Self> {
        Self::new(ObserverMethod::MovingAverage { momentum })
    }

    /// Fold one batch into the running range and return the batch's own range
    pub fn observe(&mut self, batch: ArrayView2<'_, f32>) -> Result<ValueRange> {
        let batch_range = reduce(batch)?;

        let next = match (self.running, self.method) {
            (None, _) => batch_range,
            (Some(running), ObserverMethod::MinMax) => running.union(batch_range),
            (Some(running), ObserverMethod::MovingAverage { momentum }) => ValueRange {
                min: running.min * (1.0 - momentum) + batch_range.min * momentum,
                max: running.max * (1.0 - momentum) + batch_range.max * momentum,
            },
        };

        self.running = Some(next);
        self.num_batches += 1;
        debug!(
            batch = self.num_batches,
            min = next.min,
            max = next.max,
            "updated running range"
        );
        Ok(batch_range)
    }

    /// Running range, `None` before the first batch
    pub fn range(&self) -> Option<ValueRange> {
        self.running
    }

    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    pub fn method(&self) -> ObserverMethod {
        self.method
    }

    pub fn has_data(&self) -> bool {
        self.running.is_some()
    }

    pub fn reset(&mut self) {
        self.running = None;
        self.num_batches = 0;
    }

    /// Calibrate from the running range
    pub fn calibrate(&self, codes: CodeRange) -> Result<QuantizationParameters> {
        let range = self.running.ok_or_else(|| {
            CalibrarError::invalid_argument("observer", "no batches observed yet")
        })?;
        calibrate(range, codes)
    }
}
