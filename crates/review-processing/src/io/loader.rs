use crate::error::{PreprocessingError, Result, ResultExt};
use crate::schema::NA_MARKERS;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Loads the raw review CSV into a DataFrame.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file with a header row.
    ///
    /// Empty fields, quoted or not, and the spellings in [`NA_MARKERS`]
    /// become nulls. The schema is inferred from the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessingError::FileNotFound`] without opening anything
    /// when `path` is not an existing regular file.
    pub fn load(path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        info!("Loading data from: {}", path.display());

        if !path.is_file() {
            return Err(PreprocessingError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let null_values = NullValues::AllColumns(NA_MARKERS.iter().map(|m| (*m).into()).collect());

        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_quote_char(Some(b'"'))
                    .with_null_values(Some(null_values)),
            )
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .context(format!("Failed to parse CSV file {}", path.display()))?;

        // The reader keeps `""` as an empty string
        Self::empty_strings_to_null(&mut df)?;

        debug!("Dataset loaded: {:?}", df.shape());
        Ok(df)
    }

    fn empty_strings_to_null(df: &mut DataFrame) -> Result<()> {
        let text_columns: Vec<PlSmallStr> = df
            .get_columns()
            .iter()
            .filter(|c| c.dtype() == &DataType::String)
            .map(|c| c.name().clone())
            .collect();

        for name in text_columns {
            let cleaned: StringChunked = df
                .column(name.as_str())?
                .str()?
                .into_iter()
                .map(|v| v.filter(|s| !s.is_empty()))
                .collect();
            df.with_column(cleaned.with_name(name).into_series())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.csv");

        let err = DataLoader::load(&path).unwrap_err();
        match err {
            PreprocessingError::FileNotFound { path: reported } => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load(dir.path()).unwrap_err();
        assert!(err.is_file_not_found());
    }

    #[test]
    fn test_load_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "reviews.csv",
            "content,score,thumbsUpCount\ngood,5,3\nbad,1,0\n",
        );

        let df = DataLoader::load(&path).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("score").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_load_reads_na_markers_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "reviews.csv",
            "content,score\ngood,5\nNA,4\nfine,\nmeh,N/A\n",
        );

        let df = DataLoader::load(&path).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(df.column("content").unwrap().null_count(), 1);
        assert_eq!(df.column("score").unwrap().null_count(), 2);
    }

    #[test]
    fn test_load_reads_indeterminate_markers_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "reviews.csv",
            "content,score\n1.#IND,5\nok,-1.#IND\nfine,3\n",
        );

        let df = DataLoader::load(&path).unwrap();
        assert_eq!(df.column("content").unwrap().null_count(), 1);
        assert_eq!(df.column("score").unwrap().null_count(), 1);
        assert_eq!(df.column("score").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_load_reads_quoted_empty_text_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "reviews.csv",
            "content,score,thumbsUpCount\n\"\",1,0\nok,3,5\nfine,5,5\n",
        );

        let df = DataLoader::load(&path).unwrap();
        assert_eq!(df.height(), 3);
        let content = df.column("content").unwrap().str().unwrap();
        assert_eq!(content.null_count(), 1);
        assert_eq!(content.get(0), None);
        assert_eq!(content.get(1), Some("ok"));
    }
}
