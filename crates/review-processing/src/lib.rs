//! App Review Preprocessing Library
//!
//! Cleans a raw CSV export of app-store reviews and labels each review's
//! sentiment from its star rating, built with Rust and Polars.
//!
//! # Overview
//!
//! The pipeline runs four stages in order:
//!
//! - **Loading**: Read the raw CSV, turning empty fields and NA spellings into nulls
//! - **Cleaning**: Drop developer reply columns, rows with missing values and exact
//!   duplicates; standardize `thumbsUpCount` into `thumbsUpCount_scaled`; remove
//!   `thumbsUpCount` outliers with the 1.5 × IQR rule
//! - **Labeling**: Map `score` to `negative` / `neutral` / `positive`
//! - **Saving**: Write the result as CSV, creating the output directory
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use review_processing::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::builder()
//!     .input_path("data_raw/ulasan_KAI.csv")
//!     .output_path("data_clean/ulasan_KAI_preprocessing.csv")
//!     .build()?;
//!
//! let summary = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! println!("{} of {} rows kept", summary.rows_saved, summary.rows_loaded);
//! ```
//!
//! Each stage can also be used on its own:
//!
//! ```rust,ignore
//! use review_processing::{DataCleaner, DataLoader, SentimentLabeler};
//!
//! let df = DataLoader::load("reviews.csv")?;
//! let (df, report) = DataCleaner.clean(df)?;
//! let (df, distribution) = SentimentLabeler.label(df)?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod io;
pub mod labeler;
pub mod pipeline;
pub mod schema;
pub mod statistics;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DataCleaner, StandardScaler};
pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use error::{ErrorKind, PreprocessingError, Result as PreprocessingResult, ResultExt};
pub use io::{DataLoader, DataSaver};
pub use labeler::SentimentLabeler;
pub use pipeline::{
    ClosureProgressReporter, OutlierHandler, Pipeline, PipelineBuilder, PipelineStage,
    ProcessedReviews, ProgressReporter, ProgressUpdate,
};
pub use types::{
    CleaningReport, OutlierReport, PipelineSummary, ScalingStats, Sentiment,
    SentimentDistribution,
};
