use crate::error::{PreprocessingError, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the cleaned DataFrame to CSV.
pub struct DataSaver;

impl DataSaver {
    /// Write `df` to `path` with a header row and no index column.
    ///
    /// The parent directory is created first when it does not exist. Nothing
    /// is rolled back on failure: a directory created here stays.
    pub fn save(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let write_failed = |reason: String| PreprocessingError::WriteFailed {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
        }

        let mut file = File::create(path).map_err(|e| write_failed(e.to_string()))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .map_err(|e| write_failed(e.to_string()))?;

        info!("Cleaned data saved to: {}", path.display());
        Ok(path.to_path_buf())
    }
}
