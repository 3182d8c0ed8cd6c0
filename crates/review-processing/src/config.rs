//! Configuration types for the review processing pipeline.
//!
//! Input and output locations are fixed relative to a base directory,
//! which defaults to the directory of the running executable. Column names
//! are not configurable; see [`crate::schema`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input file, relative to the base directory.
pub const DEFAULT_INPUT: &str = "../data_raw/ulasan_KAI.csv";

/// Output file, relative to the base directory.
pub const DEFAULT_OUTPUT: &str = "data_clean/ulasan_KAI_preprocessing.csv";

/// Configuration for the pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use review_processing::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .base_dir("/opt/reviews/preprocessing")
///     .strict_exit_code(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// CSV file to read.
    pub input_path: PathBuf,

    /// CSV file to write. Its parent directory is created when missing.
    pub output_path: PathBuf,

    /// Whether a failed run should end the process with a non-zero status.
    /// When false, failures are only reported in the log.
    /// Default: false
    pub strict_exit_code: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_base_dir(program_dir())
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Fixed input/output layout under the given base directory.
    pub fn from_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            input_path: base_dir.join(DEFAULT_INPUT),
            output_path: base_dir.join(DEFAULT_OUTPUT),
            strict_exit_code: false,
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path"));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path"));
        }

        if self.output_path.file_name().is_none() {
            return Err(ConfigValidationError::MissingFileName(
                self.output_path.clone(),
            ));
        }

        Ok(())
    }
}

/// Directory containing the running executable.
///
/// Falls back to the current directory when the executable path is unknown.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Path '{0}' must not be empty")]
    EmptyPath(&'static str),

    #[error("Output path '{}' does not name a file", .0.display())]
    MissingFileName(PathBuf),
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    base_dir: Option<PathBuf>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    strict_exit_code: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the base directory the default input and output paths hang off.
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    /// Override the input file path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Override the output file path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Map failures to a non-zero process exit status.
    pub fn strict_exit_code(mut self, strict: bool) -> Self {
        self.strict_exit_code = Some(strict);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::from_base_dir(self.base_dir.unwrap_or_else(program_dir));

        let config = PipelineConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_path: self.output_path.unwrap_or(defaults.output_path),
            strict_exit_code: self.strict_exit_code.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_dir_layout() {
        let config = PipelineConfig::from_base_dir("/srv/preprocessing");
        assert_eq!(
            config.input_path,
            PathBuf::from("/srv/preprocessing/../data_raw/ulasan_KAI.csv")
        );
        assert_eq!(
            config.output_path,
            PathBuf::from("/srv/preprocessing/data_clean/ulasan_KAI_preprocessing.csv")
        );
        assert!(!config.strict_exit_code);
    }

    #[test]
    fn test_default_uses_program_dir() {
        let config = PipelineConfig::default();
        assert!(config.input_path.starts_with(program_dir()));
        assert!(config.output_path.ends_with(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::builder()
            .base_dir("/base")
            .output_path("/tmp/out/clean.csv")
            .strict_exit_code(true)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("/base/../data_raw/ulasan_KAI.csv"));
        assert_eq!(config.output_path, PathBuf::from("/tmp/out/clean.csv"));
        assert!(config.strict_exit_code);
    }

    #[test]
    fn test_validation_empty_input() {
        let result = PipelineConfig::builder().input_path("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPath("input_path")
        ));
    }

    #[test]
    fn test_validation_output_without_file_name() {
        let result = PipelineConfig::builder().output_path("/").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::MissingFileName(_)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "input_path": "raw/reviews.csv",
            "output_path": "clean/reviews.csv",
            "strict_exit_code": true
        }"#;

        let config: PipelineConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.input_path, PathBuf::from("raw/reviews.csv"));
        assert_eq!(config.output_path, PathBuf::from("clean/reviews.csv"));
        assert!(config.strict_exit_code);
        assert!(config.validate().is_ok());
    }
}
