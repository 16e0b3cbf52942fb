pub mod columns;
pub mod parser;
pub mod processor;

pub use columns::{resolve_columns, ColumnLayout, ColumnMap};
pub use parser::{parse_csv, parse_csv_reader, BatchInput};
pub use processor::{process_batch, process_csv, BatchResult, BatchRow, BatchSummary};
