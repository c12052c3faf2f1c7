//! CSV row source.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::MapperError;

/// One spreadsheet row as ordered `(header, cell)` pairs.
pub type Row = Vec<(String, String)>;

/// Read a CSV export with a header row.
///
/// Short records are padded by omission: a record with fewer cells than
/// there are headers only yields pairs for the cells it has. Trimming is left
/// to the mapper.
///
/// # Errors
///
/// Returns [`MapperError::Csv`] if the header row or a record is malformed.
pub fn rows_from_csv<R: Read>(reader: R) -> Result<Vec<Row>, MapperError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }
    tracing::debug!(rows = rows.len(), columns = headers.len(), "read csv rows");
    Ok(rows)
}

/// Read a CSV export from disk. See [`rows_from_csv`].
///
/// # Errors
///
/// Returns [`MapperError::Io`] if the file cannot be opened, otherwise as
/// [`rows_from_csv`].
pub fn rows_from_path(path: &Path) -> Result<Vec<Row>, MapperError> {
    let file = std::fs::File::open(path)?;
    rows_from_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pairs_headers_with_cells() {
        let csv = "Title,Implemented\nA.5.1,Completely\nA.5.2\n";
        let rows = rows_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                ("Title".to_string(), "A.5.1".to_string()),
                ("Implemented".to_string(), "Completely".to_string())
            ]
        );
        assert_eq!(rows[1], vec![("Title".to_string(), "A.5.2".to_string())]);
    }

    #[test]
    fn quoted_cells_keep_markup() {
        let csv = "Explanation\n\"<p>See <a href=\"\"X\"\">Y</a></p>\"\n";
        let rows = rows_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0][0].1, r#"<p>See <a href="X">Y</a></p>"#);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = rows_from_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, MapperError::Io(_)));
    }
}
