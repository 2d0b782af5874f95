// ============================================================
// CSV INFRASTRUCTURE
// ============================================================
// Tolerant ingestion of operator-supplied CSV exports

mod line_recovery;
mod reader;

pub use line_recovery::recover_logical_lines;
pub use reader::{CsvReader, ParsedCsv};
