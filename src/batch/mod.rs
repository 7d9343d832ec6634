//! CSV batch path: table I/O and batch summary.

mod csv;
mod summary;

pub use csv::CsvTable;
pub use summary::{
    augment, parse_readings, summarize, summarize_table, validate_columns, BatchRow,
    BatchSummary, REQUIRED_COLUMNS, RESULT_COLUMNS,
};
