//! Shared helpers for reading typed values out of a DataFrame.

use crate::error::{PreprocessingError, Result};
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Read a numeric column as `f64` values, one per row.
///
/// Nulls and `NaN` both come back as `None`. A column that is neither numeric
/// nor all-null is rejected with [`PreprocessingError::TypeMismatch`] rather
/// than coerced.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let dtype = column.dtype();

    if df.height() == 0 {
        return Ok(Vec::new());
    }

    if !is_numeric_dtype(dtype) && *dtype != DataType::Null {
        return Err(PreprocessingError::TypeMismatch {
            column: name.to_string(),
            dtype: dtype.to_string(),
        });
    }

    let floats = column.as_materialized_series().cast(&DataType::Float64)?;
    let values = floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();

    Ok(values)
}

/// Build a mask that is `true` for rows without a missing value in any column.
///
/// Missing means null in any column, or `NaN` in a float column.
pub fn complete_rows_mask(df: &DataFrame) -> PolarsResult<BooleanChunked> {
    let mut keep = vec![true; df.height()];

    for column in df.get_columns() {
        let series = column.as_materialized_series();

        let nulls = series.is_null();
        for (idx, is_null) in (&nulls).into_iter().enumerate() {
            if is_null.unwrap_or(false) {
                keep[idx] = false;
            }
        }

        if is_float_dtype(series.dtype()) {
            let floats = series.cast(&DataType::Float64)?;
            for (idx, value) in floats.f64()?.into_iter().enumerate() {
                if value.is_some_and(f64::is_nan) {
                    keep[idx] = false;
                }
            }
        }
    }

    Ok(BooleanChunked::from_slice("complete".into(), &keep))
}
