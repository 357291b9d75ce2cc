//! Dataset loading.

use crate::error::{CleaningError, Result, ResultExt};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Rows scanned to infer column dtypes.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Load a delimited file with a header row. Empty fields become nulls.
///
/// A file that fails to parse as-is is retried once with doubled quotes
/// collapsed and blank lines dropped.
pub fn load_dataset(path: &Path, separator: u8) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(CleaningError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let df = match read_csv_file(path, separator) {
        Ok(df) => df,
        Err(e) => {
            debug!("Standard loading failed: {}", e);
            let content = std::fs::read_to_string(path).map_err(|_| CleaningError::MissingFile {
                path: path.to_path_buf(),
            })?;
            read_csv_content(clean_csv_content(&content), separator)
                .context(format!("parsing {}", path.display()))?
        }
    };

    info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

fn read_options(separator: u8) -> CsvReadOptions {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_quote_char(Some(b'"')),
        )
}

fn read_csv_file(path: &Path, separator: u8) -> PolarsResult<DataFrame> {
    read_options(separator)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

fn read_csv_content(content: String, separator: u8) -> PolarsResult<DataFrame> {
    read_options(separator)
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()
}

fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_semicolon_file_with_blank_fields() {
        let file = write_temp("ID;Income;Education\n1;100;PhD\n2;;Master\n3;300;\n");

        let df = load_dataset(file.path(), b';').unwrap();

        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("Income").unwrap().null_count(), 1);
        assert_eq!(df.column("Education").unwrap().null_count(), 1);
        assert!(crate::utils::is_numeric_dtype(df.column("Income").unwrap().dtype()));
    }

    #[test]
    fn test_load_comma_file() {
        let file = write_temp("a,b\n1,x\n2,y\n");
        let df = load_dataset(file.path(), b',').unwrap();
        assert_eq!(df.shape(), (2, 2));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(Path::new("/definitely/not/here.csv"), b';').unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FILE");
    }

    #[test]
    fn test_load_directory_is_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_dataset(dir.path(), b';').unwrap_err();
        assert!(matches!(err, CleaningError::MissingFile { .. }));
    }

    #[test]
    fn test_clean_csv_content() {
        assert_eq!(clean_csv_content("a;b\n\n\"\"x\"\";1\n"), "a;b\n\"x\";1");
    }
}
