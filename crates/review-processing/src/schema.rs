//! Fixed column names of the review dataset.

use polars::prelude::*;

/// Review rating, 1 to 5.
pub const SCORE: &str = "score";

/// Number of "helpful" votes a review received.
pub const THUMBS_UP_COUNT: &str = "thumbsUpCount";

/// Standardized copy of [`THUMBS_UP_COUNT`], appended by the cleaner.
pub const THUMBS_UP_COUNT_SCALED: &str = "thumbsUpCount_scaled";

/// Sentiment label derived from [`SCORE`], appended by the labeler.
pub const SENTIMENT: &str = "sentiment";

/// Developer reply columns. Irrelevant for sentiment and dropped when present.
pub const DROPPED_COLUMNS: [&str; 2] = ["replyContent", "repliedAt"];

/// Cell spellings read as missing values, in every column.
pub const NA_MARKERS: [&str; 18] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
    "#N/A N/A", "#NA", "<NA>", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// Check whether the frame has a column with the given name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}
