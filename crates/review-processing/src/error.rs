//! Custom error types for the review processing pipeline.
//!
//! Stages never swallow their own failures. Every error travels up to the
//! caller of [`Pipeline::run`](crate::Pipeline::run) as a [`PreprocessingError`],
//! which can be classified with [`PreprocessingError::kind`] and mapped to a
//! process exit status with [`PreprocessingError::exit_code`].

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input dataset could not be found.
    MissingInput,
    /// The cleaned dataset could not be written.
    WriteFailure,
    /// Anything else: malformed CSV, bad column contents, invalid configuration.
    Runtime,
}

/// The main error type for the review processing pipeline.
#[derive(Error, Debug)]
pub enum PreprocessingError {
    /// The input file does not exist. Raised before any read is attempted.
    #[error("Dataset file not found at: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A column that must be numeric holds some other type.
    #[error("Column '{column}' must be numeric but has type {dtype}")]
    TypeMismatch { column: String, dtype: String },

    /// A numeric column holds infinite values, or scaling it overflowed.
    #[error("Column '{column}' contains non-finite values")]
    NonFiniteValue { column: String },

    /// Writing the output file failed.
    #[error("Failed to write dataset to {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PreprocessingError>,
    },
}

impl PreprocessingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PreprocessingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, suitable for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::NonFiniteValue { .. } => "NON_FINITE_VALUE",
            Self::WriteFailed { .. } => "WRITE_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Classify the failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::MissingInput,
            Self::WriteFailed { .. } => ErrorKind::WriteFailure,
            Self::WithContext { source, .. } => source.kind(),
            _ => ErrorKind::Runtime,
        }
    }

    /// Process exit status used when strict exit codes are enabled.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::MissingInput => 2,
            ErrorKind::WriteFailure => 3,
            ErrorKind::Runtime => 1,
        }
    }

    /// Check if this error is a missing input file.
    pub fn is_file_not_found(&self) -> bool {
        self.kind() == ErrorKind::MissingInput
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for PreprocessingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PreprocessingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PreprocessingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PreprocessingError::Polars(e).with_context(context))
    }
}
