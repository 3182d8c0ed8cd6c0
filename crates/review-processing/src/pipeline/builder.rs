//! Main preprocessing pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for running
//! load, clean, label and save in that order.

use crate::cleaner::DataCleaner;
use crate::config::{ConfigValidationError, PipelineConfig};
use crate::error::Result;
use crate::io::{DataLoader, DataSaver};
use crate::labeler::SentimentLabeler;
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::types::{CleaningReport, PipelineSummary, SentimentDistribution};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// Output of the in-memory part of the pipeline.
#[derive(Debug, Clone)]
pub struct ProcessedReviews {
    pub data: DataFrame,
    pub cleaning: CleaningReport,
    pub sentiment: Option<SentimentDistribution>,
}

/// The review preprocessing pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use review_processing::{Pipeline, PipelineConfig};
///
/// let summary = Pipeline::builder()
///     .config(PipelineConfig::builder().base_dir("/srv/reviews/bin").build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run()?;
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: DataCleaner,
    labeler: SentimentLabeler,
}

// A configured pipeline can be moved to a worker thread
static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured input, clean and label it, and write the result.
    ///
    /// Any stage failure aborts the remaining stages. The failure is logged
    /// once here and then returned; nothing is written when a stage before
    /// saving fails.
    pub fn run(&self) -> Result<PipelineSummary> {
        match self.run_internal() {
            Ok(summary) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(summary)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline failed: {}", e);
                Err(e)
            }
        }
    }

    /// Clean and label a frame that is already in memory.
    pub fn process(&self, df: DataFrame) -> Result<ProcessedReviews> {
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Cleaning,
            0.0,
            "Cleaning data...",
        ));
        let (df, cleaning) = self.cleaner.clean(df)?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Cleaning,
            1.0,
            format!("Removed {} rows", cleaning.rows_removed()),
        ));

        self.report_progress(ProgressUpdate::new(
            PipelineStage::Labeling,
            0.0,
            "Applying sentiment labels...",
        ));
        let (data, sentiment) = self.labeler.label(df)?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Labeling,
            1.0,
            "Labeling complete",
        ));

        Ok(ProcessedReviews {
            data,
            cleaning,
            sentiment,
        })
    }

    /// Log the update and forward it to the reporter, if one is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        debug!(
            "[{:>3.0}%] {}: {}",
            update.progress * 100.0,
            update.stage.display_name(),
            update.message
        );
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<PipelineSummary> {
        let start_time = Instant::now();

        self.report_progress(ProgressUpdate::new(
            PipelineStage::Loading,
            0.0,
            format!("Loading {}", self.config.input_path.display()),
        ));
        let df = DataLoader::load(&self.config.input_path)?;
        let rows_loaded = df.height();
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Loading,
            1.0,
            format!("Loaded {} rows", rows_loaded),
        ));

        let ProcessedReviews {
            mut data,
            cleaning,
            sentiment,
        } = self.process(df)?;

        self.report_progress(ProgressUpdate::new(
            PipelineStage::Saving,
            0.0,
            format!("Saving {}", self.config.output_path.display()),
        ));
        let output_path = DataSaver::save(&mut data, &self.config.output_path)?;
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Saving,
            1.0,
            "Saving complete",
        ));

        let duration_ms = start_time.elapsed().as_millis() as u64;
        debug!("Pipeline finished in {} ms", duration_ms);

        Ok(PipelineSummary {
            input_path: self.config.input_path.clone(),
            output_path,
            rows_loaded,
            rows_saved: data.height(),
            columns: data
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect(),
            cleaning,
            sentiment,
            duration_ms,
            finished_at: chrono::Local::now().to_rfc3339(),
        })
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        debug!(
            "Pipeline configured: {} -> {}",
            config.input_path.display(),
            config.output_path.display()
        );

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            cleaner: DataCleaner,
            labeler: SentimentLabeler,
        })
    }
}
