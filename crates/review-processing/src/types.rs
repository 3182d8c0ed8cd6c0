use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Sentiment label derived from a review score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// Classify a score: `<= 2` negative, `== 3` neutral, anything else positive.
    ///
    /// Out-of-range scores are not validated, so `-5` is negative and `10`
    /// is positive.
    pub fn from_score(score: f64) -> Self {
        if score <= 2.0 {
            Self::Negative
        } else if score == 3.0 {
            Self::Neutral
        } else {
            Self::Positive
        }
    }

    /// Label as written to the output file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of rows carrying each sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
    /// Rows whose score was missing and therefore got no label.
    pub unlabeled: usize,
}

impl SentimentDistribution {
    /// Count one label.
    pub fn record(&mut self, sentiment: Option<Sentiment>) {
        match sentiment {
            Some(Sentiment::Negative) => self.negative += 1,
            Some(Sentiment::Neutral) => self.neutral += 1,
            Some(Sentiment::Positive) => self.positive += 1,
            None => self.unlabeled += 1,
        }
    }

    /// Total number of rows seen.
    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive + self.unlabeled
    }
}

/// Parameters fitted by the standard scaler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingStats {
    /// Mean of the raw column.
    pub mean: f64,
    /// Population standard deviation of the raw column.
    pub std_dev: f64,
    /// True when the deviation was zero and every scaled value was set to 0.
    pub zero_variance: bool,
}

/// IQR bounds used for outlier removal and the number of rows it dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub rows_removed: usize,
}

impl OutlierReport {
    /// Check whether a value lies inside the closed bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }
}

/// What the cleaning stage did to the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Columns removed because they are irrelevant for sentiment analysis.
    pub columns_dropped: Vec<String>,
    /// Rows removed because some column was missing a value.
    pub missing_rows_removed: usize,
    /// Exact duplicate rows removed (first occurrence kept).
    pub duplicates_removed: usize,
    /// Scaler parameters, absent when the scaled column was not produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling: Option<ScalingStats>,
    /// Outlier bounds, absent when no bounds could be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<OutlierReport>,
}

impl CleaningReport {
    /// Total rows removed by all cleaning steps.
    pub fn rows_removed(&self) -> usize {
        self.missing_rows_removed
            + self.duplicates_removed
            + self.outliers.map_or(0, |o| o.rows_removed)
    }
}

/// Summary of one complete pipeline run.
///
/// # Example
///
/// ```rust,ignore
/// let summary = Pipeline::builder().config(config).build()?.run()?;
/// println!("Saved {} rows to {}", summary.rows_saved, summary.output_path.display());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    /// Rows read from the input file.
    pub rows_loaded: usize,
    /// Rows remaining after cleaning (and therefore written).
    pub rows_saved: usize,

    /// Column names of the written file, in order.
    pub columns: Vec<String>,

    pub cleaning: CleaningReport,

    /// Absent when the input had no score column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentDistribution>,

    /// Total execution time in milliseconds.
    pub duration_ms: u64,
    /// RFC 3339 timestamp of when the run finished.
    pub finished_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_from_score_table() {
        assert_eq!(Sentiment::from_score(1.0), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(2.0), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(3.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(4.0), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(5.0), Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_out_of_domain_scores() {
        assert_eq!(Sentiment::from_score(-5.0), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(10.0), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(2.5), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(3.5), Sentiment::Positive);
    }

    #[test]
    fn test_sentiment_display() {
        assert_eq!(Sentiment::Neutral.to_string(), "neutral");
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            "\"negative\""
        );
    }

    #[test]
    fn test_distribution_record() {
        let mut dist = SentimentDistribution::default();
        dist.record(Some(Sentiment::Positive));
        dist.record(Some(Sentiment::Positive));
        dist.record(Some(Sentiment::Negative));
        dist.record(None);

        assert_eq!(dist.positive, 2);
        assert_eq!(dist.negative, 1);
        assert_eq!(dist.neutral, 0);
        assert_eq!(dist.unlabeled, 1);
        assert_eq!(dist.total(), 4);
    }

    #[test]
    fn test_cleaning_report_rows_removed() {
        let report = CleaningReport {
            missing_rows_removed: 2,
            duplicates_removed: 3,
            outliers: Some(OutlierReport {
                q1: 0.0,
                q3: 4.0,
                iqr: 4.0,
                lower_bound: -6.0,
                upper_bound: 10.0,
                rows_removed: 1,
            }),
            ..Default::default()
        };
        assert_eq!(report.rows_removed(), 6);
    }

    #[test]
    fn test_outlier_bounds_are_inclusive() {
        let report = OutlierReport {
            q1: 1.0,
            q3: 3.0,
            iqr: 2.0,
            lower_bound: -2.0,
            upper_bound: 6.0,
            rows_removed: 0,
        };
        assert!(report.contains(-2.0));
        assert!(report.contains(6.0));
        assert!(!report.contains(6.5));
    }
}
