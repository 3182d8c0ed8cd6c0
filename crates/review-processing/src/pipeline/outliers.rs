//! Outlier handling module.
//!
//! Contains the IQR filter applied to `thumbsUpCount`.

use crate::error::Result;
use crate::statistics::quantile;
use crate::types::OutlierReport;
use crate::utils::numeric_values;
use polars::prelude::*;
use tracing::debug;

/// Multiplier applied to the IQR to get the fences.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Handles outlier detection and removal.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Compute the IQR fences of a set of values.
    ///
    /// Returns a report with `rows_removed == 0`; `None` for no values.
    pub fn bounds(values: &[f64]) -> Option<OutlierReport> {
        let q1 = quantile(values, 0.25)?;
        let q3 = quantile(values, 0.75)?;
        let iqr = q3 - q1;

        Some(OutlierReport {
            q1,
            q3,
            iqr,
            lower_bound: q1 - IQR_MULTIPLIER * iqr,
            upper_bound: q3 + IQR_MULTIPLIER * iqr,
            rows_removed: 0,
        })
    }

    /// Remove rows whose value in `column` falls strictly outside
    /// `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]`.
    ///
    /// Quartiles come from the rows present before removal. Null values are
    /// kept. Returns `None` and leaves the frame alone when the column has no
    /// values.
    pub fn remove_outliers(df: &mut DataFrame, column: &str) -> Result<Option<OutlierReport>> {
        let values = numeric_values(df, column)?;
        let observed: Vec<f64> = values.iter().flatten().copied().collect();

        let Some(mut report) = Self::bounds(&observed) else {
            debug!("No values in '{}', skipping outlier removal", column);
            return Ok(None);
        };

        let mask_values: Vec<bool> = values
            .iter()
            .map(|v| v.is_none_or(|val| report.contains(val)))
            .collect();

        let original_rows = df.height();
        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
        *df = df.filter(&mask)?;
        report.rows_removed = original_rows - df.height();

        debug!(
            "IQR bounds for '{}': [{:.4}, {:.4}], removed {} rows",
            column, report.lower_bound, report.upper_bound, report.rows_removed
        );

        Ok(Some(report))
    }
}
