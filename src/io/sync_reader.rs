//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LedgerRecord, SettleError>` for each CSV row:
//!
//! ```no_run
//! use split_settle::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Applying {} record", record.kind()),
//!         Err(e) => eprintln!("Skipping row: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants carrying the line number
//!
//! Rows are read one at a time; the file is never loaded into memory at once.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerRecord, SettleError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be omitted)
    /// - Use an 8KB buffer
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist and `IoError` if it
    /// cannot be opened for another reason.
    pub fn new(path: &Path) -> Result<Self, SettleError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

/// Map a failure to open `path` to the matching error
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> SettleError {
    if error.kind() == ErrorKind::NotFound {
        SettleError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        SettleError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerRecord, SettleError>;

    /// Get the next ledger record from the CSV file
    ///
    /// Conversion errors are reported as `ParseError` with the 1-based line
    /// number of the row (the header is line 1).
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;

        Some(match row {
            Ok(csv_record) => convert_csv_record(csv_record).map_err(|e| SettleError::ParseError {
                line: Some(self.line_num),
                message: e.to_string(),
            }),
            Err(e) => Err(SettleError::from(e)),
        })
    }
}
