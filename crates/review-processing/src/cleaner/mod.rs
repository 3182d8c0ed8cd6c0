//! Data cleaning module for the review dataset.
//!
//! This module provides functionality for:
//! - Dropping developer reply columns
//! - Removing rows with missing values
//! - Removing exact duplicate rows
//! - Standardizing `thumbsUpCount`
//! - Removing `thumbsUpCount` outliers
//!
//! The steps always run in that order: each count depends on the rows the
//! previous step left behind.

mod scaling;

pub use scaling::StandardScaler;

use crate::error::Result;
use crate::pipeline::outliers::OutlierHandler;
use crate::schema::{DROPPED_COLUMNS, THUMBS_UP_COUNT, THUMBS_UP_COUNT_SCALED, has_column};
use crate::types::CleaningReport;
use crate::utils::complete_rows_mask;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner for the review dataset.
pub struct DataCleaner;

impl DataCleaner {
    /// Run every cleaning step and report what each one removed.
    ///
    /// Scaling and outlier removal are skipped when `thumbsUpCount` is absent.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        info!("Starting data cleaning...");

        let (df, columns_dropped) = Self::drop_irrelevant_columns(df);
        if !columns_dropped.is_empty() {
            debug!("Dropped columns: {:?}", columns_dropped);
        }

        let (df, missing_rows_removed) = Self::drop_missing_rows(&df)?;
        info!("  - Rows with missing values removed: {}", missing_rows_removed);

        let (mut df, duplicates_removed) = Self::drop_duplicate_rows(&df)?;
        info!("  - Duplicate rows removed: {}", duplicates_removed);

        let mut report = CleaningReport {
            columns_dropped,
            missing_rows_removed,
            duplicates_removed,
            ..Default::default()
        };

        if has_column(&df, THUMBS_UP_COUNT) {
            report.scaling =
                StandardScaler::fit_transform(&mut df, THUMBS_UP_COUNT, THUMBS_UP_COUNT_SCALED)?;

            report.outliers = OutlierHandler::remove_outliers(&mut df, THUMBS_UP_COUNT)?;
            info!(
                "  - Outlier rows removed: {}",
                report.outliers.map_or(0, |o| o.rows_removed)
            );
        } else {
            debug!(
                "Column '{}' not found, skipping scaling and outlier removal",
                THUMBS_UP_COUNT
            );
        }

        Ok((df, report))
    }

    /// Drop `replyContent` and `repliedAt`. Absent columns are ignored.
    pub fn drop_irrelevant_columns(df: DataFrame) -> (DataFrame, Vec<String>) {
        let present: Vec<String> = DROPPED_COLUMNS
            .iter()
            .filter(|name| has_column(&df, name))
            .map(|name| name.to_string())
            .collect();

        if present.is_empty() {
            return (df, present);
        }

        let cols_ref: Vec<PlSmallStr> = present.iter().map(|s| s.as_str().into()).collect();
        (df.drop_many(cols_ref), present)
    }

    /// Drop every row with a missing value in any column.
    pub fn drop_missing_rows(df: &DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        let mask = complete_rows_mask(df)?;
        let df = df.filter(&mask)?;
        let removed = before - df.height();
        Ok((df, removed))
    }

    /// Collapse rows identical across every column, keeping the first one
    /// where it stands.
    pub fn drop_duplicate_rows(df: &DataFrame) -> Result<(DataFrame, usize)> {
        if df.height() == 0 || df.width() == 0 {
            return Ok((df.clone(), 0));
        }

        let before = df.height();
        let df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - df.height();
        Ok((df, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    // ==================== drop_irrelevant_columns tests ====================

    #[test]
    fn test_drop_irrelevant_columns_present() {
        let df = df![
            "content" => ["a", "b"],
            "replyContent" => [Some("thanks"), None],
            "score" => [1i64, 2],
            "repliedAt" => [Some("2024-01-01"), None],
        ]
        .unwrap();

        let (df, dropped) = DataCleaner::drop_irrelevant_columns(df);
        assert_eq!(column_names(&df), vec!["content", "score"]);
        assert_eq!(dropped, vec!["replyContent", "repliedAt"]);
    }

    #[test]
    fn test_drop_irrelevant_columns_absent_is_noop() {
        let df = df!["content" => ["a"], "score" => [1i64]].unwrap();
        let (df, dropped) = DataCleaner::drop_irrelevant_columns(df);
        assert_eq!(column_names(&df), vec!["content", "score"]);
        assert!(dropped.is_empty());
    }

    // ==================== drop_missing_rows tests ====================

    #[test]
    fn test_drop_missing_rows() {
        let df = df![
            "score" => [Some(1i64), None, Some(3)],
            "content" => [Some("a"), Some("b"), None],
        ]
        .unwrap();

        let (df, removed) = DataCleaner::drop_missing_rows(&df).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(df.height(), 1);
    }

    // ==================== drop_duplicate_rows tests ====================

    #[test]
    fn test_drop_duplicate_rows_keeps_first_position() {
        let df = df![
            "content" => ["a", "b", "a", "c", "b"],
            "score" => [1i64, 2, 1, 3, 2],
        ]
        .unwrap();

        let (df, removed) = DataCleaner::drop_duplicate_rows(&df).unwrap();
        assert_eq!(removed, 2);

        let content: Vec<Option<&str>> = df
            .column("content")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(content, vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_drop_duplicate_rows_partial_match_is_kept() {
        let df = df![
            "content" => ["a", "a"],
            "score" => [1i64, 2],
        ]
        .unwrap();

        let (df, removed) = DataCleaner::drop_duplicate_rows(&df).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 2);
    }

    // ==================== clean tests ====================

    #[test]
    fn test_clean_full() {
        let df = df![
            "score" => [Some(1i64), Some(3), Some(5), Some(1), None],
            "thumbsUpCount" => [0i64, 5, 5, 0, 2],
            "replyContent" => [Some("x"), None, None, Some("x"), None],
        ]
        .unwrap();

        let (df, report) = DataCleaner.clean(df).unwrap();

        assert_eq!(
            column_names(&df),
            vec!["score", "thumbsUpCount", "thumbsUpCount_scaled"]
        );
        assert_eq!(report.columns_dropped, vec!["replyContent"]);
        assert_eq!(report.missing_rows_removed, 1);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(df.height(), 3);
        assert!(report.scaling.is_some());
        assert_eq!(report.outliers.map(|o| o.rows_removed), Some(0));
    }

    #[test]
    fn test_clean_without_thumbs_up_column() {
        let df = df![
            "score" => [1i64, 2, 2, 5],
            "content" => ["a", "b", "b", "c"],
        ]
        .unwrap();

        let (df, report) = DataCleaner.clean(df).unwrap();

        assert_eq!(column_names(&df), vec!["score", "content"]);
        assert_eq!(df.height(), 3);
        assert!(report.scaling.is_none());
        assert!(report.outliers.is_none());
    }

    #[test]
    fn test_clean_leaves_no_missing_or_duplicates() {
        let df = df![
            "score" => [Some(1i64), Some(1), None, Some(4), Some(4), Some(2)],
            "content" => [Some("a"), Some("a"), Some("b"), None, Some("d"), Some("e")],
            "thumbsUpCount" => [Some(1i64), Some(1), Some(2), Some(3), Some(3), None],
        ]
        .unwrap();

        let (df, _) = DataCleaner.clean(df).unwrap();

        for column in df.get_columns() {
            assert_eq!(column.null_count(), 0, "column {} has nulls", column.name());
        }
        let (_, dups) = DataCleaner::drop_duplicate_rows(&df).unwrap();
        assert_eq!(dups, 0);
    }

    #[test]
    fn test_clean_is_idempotent_on_rows() {
        let df = df![
            "score" => [Some(1i64), Some(1), Some(3), None, Some(5), Some(4)],
            "thumbsUpCount" => [Some(2i64), Some(2), Some(3), Some(1), Some(4), Some(1)],
            "repliedAt" => [Some("t"), Some("t"), None, None, None, Some("t")],
        ]
        .unwrap();

        let (once, _) = DataCleaner.clean(df).unwrap();
        let (twice, report) = DataCleaner.clean(once.clone()).unwrap();

        assert_eq!(report.missing_rows_removed, 0);
        assert_eq!(report.duplicates_removed, 0);
        assert_eq!(report.outliers.map(|o| o.rows_removed), Some(0));
        assert_eq!(once.height(), 4);
        assert!(once.equals(&twice));
    }

    #[test]
    fn test_clean_empty_after_missing_rows() {
        let df = df![
            "score" => [None::<i64>, None],
            "thumbsUpCount" => [1i64, 2],
        ]
        .unwrap();

        let (df, report) = DataCleaner.clean(df).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(report.missing_rows_removed, 2);
        assert!(has_column(&df, THUMBS_UP_COUNT_SCALED));
        assert!(report.outliers.is_none());
    }
}
