//! Sentiment labeling from review scores.

use crate::error::Result;
use crate::schema::{SCORE, SENTIMENT, has_column};
use crate::types::{Sentiment, SentimentDistribution};
use crate::utils::numeric_values;
use polars::prelude::*;
use tracing::{debug, info};

/// Appends a `sentiment` column derived from `score`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentimentLabeler;

impl SentimentLabeler {
    /// Label every row by its score, see [`Sentiment::from_score`].
    ///
    /// When `score` is absent the frame is returned untouched with no
    /// distribution. A missing score yields a missing label.
    pub fn label(&self, mut df: DataFrame) -> Result<(DataFrame, Option<SentimentDistribution>)> {
        info!("Applying sentiment labels...");

        if !has_column(&df, SCORE) {
            debug!("Column '{}' not found, skipping labeling", SCORE);
            return Ok((df, None));
        }

        let mut distribution = SentimentDistribution::default();
        let labels: Vec<Option<&str>> = numeric_values(&df, SCORE)?
            .into_iter()
            .map(|score| {
                let sentiment = score.map(Sentiment::from_score);
                distribution.record(sentiment);
                sentiment.map(|s| s.as_str())
            })
            .collect();

        df.with_column(Series::new(SENTIMENT.into(), labels))?;

        debug!(
            "Sentiment distribution: {} negative, {} neutral, {} positive",
            distribution.negative, distribution.neutral, distribution.positive
        );

        Ok((df, Some(distribution)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(df: &DataFrame) -> Vec<Option<String>> {
        df.column(SENTIMENT)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|s| s.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_label_score_table() {
        let df = df!["score" => [1i64, 2, 3, 4, 5]].unwrap();

        let (df, dist) = SentimentLabeler.label(df).unwrap();

        let expected: Vec<Option<String>> = ["negative", "negative", "neutral", "positive", "positive"]
            .iter()
            .map(|s| Some(s.to_string()))
            .collect();
        assert_eq!(labels(&df), expected);

        let dist = dist.unwrap();
        assert_eq!(dist.negative, 2);
        assert_eq!(dist.neutral, 1);
        assert_eq!(dist.positive, 2);
        assert_eq!(dist.unlabeled, 0);
    }

    #[test]
    fn test_label_out_of_domain_scores() {
        let df = df!["score" => [-5i64, 10]].unwrap();
        let (df, _) = SentimentLabeler.label(df).unwrap();
        assert_eq!(
            labels(&df),
            vec![Some("negative".to_string()), Some("positive".to_string())]
        );
    }

    #[test]
    fn test_label_float_scores() {
        let df = df!["score" => [2.0f64, 3.0, 2.5]].unwrap();
        let (df, _) = SentimentLabeler.label(df).unwrap();
        assert_eq!(
            labels(&df),
            vec![
                Some("negative".to_string()),
                Some("neutral".to_string()),
                Some("positive".to_string())
            ]
        );
    }

    #[test]
    fn test_label_missing_score_gives_missing_label() {
        let df = df!["score" => [Some(4i64), None]].unwrap();
        let (df, dist) = SentimentLabeler.label(df).unwrap();

        assert_eq!(labels(&df), vec![Some("positive".to_string()), None]);
        assert_eq!(dist.unwrap().unlabeled, 1);
    }

    #[test]
    fn test_label_without_score_is_noop() {
        let df = df!["content" => ["a", "b"]].unwrap();
        let (labeled, dist) = SentimentLabeler.label(df.clone()).unwrap();

        assert!(dist.is_none());
        assert!(labeled.equals(&df));
    }

    #[test]
    fn test_label_appends_last_column() {
        let df = df!["score" => [3i64], "content" => ["ok"]].unwrap();
        let (df, _) = SentimentLabeler.label(df).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["score", "content", "sentiment"]);
    }

    #[test]
    fn test_label_empty_frame() {
        let df = df!["score" => Vec::<i64>::new()].unwrap();
        let (df, dist) = SentimentLabeler.label(df).unwrap();

        assert!(has_column(&df, SENTIMENT));
        assert_eq!(dist.unwrap().total(), 0);
    }

    #[test]
    fn test_label_non_numeric_score_fails() {
        let df = df!["score" => ["five", "one"]].unwrap();
        assert!(SentimentLabeler.label(df).is_err());
    }
}
