//! Standardization of a numeric column to zero mean and unit variance.

use crate::error::{PreprocessingError, Result};
use crate::statistics::{mean, population_std};
use crate::types::ScalingStats;
use crate::utils::numeric_values;
use polars::prelude::*;
use tracing::debug;

/// Scaler fitted on one column: `(x - mean) / std_dev`.
///
/// Uses the population standard deviation. A constant column has zero
/// deviation and scales to all zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler {
    mean: f64,
    std_dev: f64,
}

impl StandardScaler {
    /// Fit on the given values. `None` when there are no values.
    pub fn fit(values: &[f64]) -> Option<Self> {
        Some(Self {
            mean: mean(values)?,
            std_dev: population_std(values)?,
        })
    }

    /// Scale one value.
    pub fn transform(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        }
    }

    pub fn stats(&self) -> ScalingStats {
        ScalingStats {
            mean: self.mean,
            std_dev: self.std_dev,
            zero_variance: self.std_dev == 0.0,
        }
    }

    /// Fit on `source` and append the scaled values as `target`.
    ///
    /// The new column is always added, even for an empty frame. Missing
    /// source values stay missing. Returns `None` when nothing could be
    /// fitted.
    ///
    /// # Errors
    ///
    /// [`PreprocessingError::NonFiniteValue`] when `source` holds an infinite
    /// value or a scaled value overflows. The frame is left unchanged.
    pub fn fit_transform(
        df: &mut DataFrame,
        source: &str,
        target: &str,
    ) -> Result<Option<ScalingStats>> {
        let values = numeric_values(df, source)?;
        let observed: Vec<f64> = values.iter().flatten().copied().collect();
        let non_finite = || PreprocessingError::NonFiniteValue {
            column: source.to_string(),
        };
        if observed.iter().any(|x| !x.is_finite()) {
            return Err(non_finite());
        }
        let scaler = Self::fit(&observed);

        let scaled: Vec<Option<f64>> = values
            .iter()
            .map(|v| v.zip(scaler).map(|(x, s)| s.transform(x)))
            .collect();
        if scaled.iter().flatten().any(|x| !x.is_finite()) {
            return Err(non_finite());
        }

        df.with_column(Series::new(target.into(), scaled))?;

        if let Some(s) = scaler {
            debug!(
                "Scaled '{}' into '{}' (mean={:.4}, std={:.4})",
                source, target, s.mean, s.std_dev
            );
        }

        Ok(scaler.map(|s| s.stats()))
    }
}
