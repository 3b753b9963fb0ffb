use std::fs::File;
use std::io::Read;
use std::path::Path;

use chartlet_common::record::{DataRecord, Dataset};
use log::debug;

use crate::error::LoaderError;
use crate::infer::infer_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Strip whitespace around headers and cells
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Loads a delimited file with a header row
pub fn load_csv(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Dataset, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = read_csv(file, options)?;
    debug!(
        "loaded {} records with columns {:?} from {}",
        dataset.len(),
        dataset.columns(),
        path.display()
    );
    Ok(dataset)
}

pub fn parse_csv(text: &str, options: &CsvOptions) -> Result<Dataset, LoaderError> {
    read_csv(text.as_bytes(), options)
}

/// Reads a header row and then one record per line, inferring each cell's type
pub fn read_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<Dataset, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.len() != columns.len() {
            return Err(LoaderError::RaggedRow {
                line: row.position().map(|p| p.line()).unwrap_or_default(),
                expected: columns.len(),
                found: row.len(),
            });
        }

        let record: DataRecord = columns
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.clone(), infer_value(cell)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::new(columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartlet_common::value::Value;

    #[test]
    fn test_parse_basic() {
        let ds = parse_csv("name,h\na,10\nb,\n", &CsvOptions::default()).unwrap();
        assert_eq!(ds.columns(), ["name", "h"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].get("h"), Some(&Value::Number(10.0)));
        assert_eq!(ds.records()[1].get("h"), Some(&Value::Null));
    }

    #[test]
    fn test_header_only() {
        let ds = parse_csv("a,b\n", &CsvOptions::default()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns(), ["a", "b"]);
    }

    #[test]
    fn test_ragged_row() {
        let err = parse_csv("a,b\n1,2\n3\n", &CsvOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_csv("/definitely/not/here.csv", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }
}
