// ============================================================
// CSV INGEST USE CASE
// ============================================================
// Orchestrate parsing, validation and transformation of one upload.

use tracing::info;

use crate::domain::error::Result;
use crate::domain::record::ValidatedRecord;
use crate::domain::report::{IngestReport, ParseDiagnostics, RejectedRow};
use crate::infrastructure::csv::CsvReader;

use super::transform::transform;

/// Run the whole pipeline over raw CSV text. Parse skips and validation
/// failures never abort the pass; the report carries them alongside the
/// accepted set. Fails only when the input as a whole is unusable.
pub fn ingest(content: &str) -> Result<IngestReport> {
    let parsed = CsvReader::parse(content)?;

    let total_lines = parsed.total_lines;
    let parsed_lines = parsed.records.len();

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (index, record) in parsed.records.into_iter().enumerate() {
        // 1-based plus the header line, matching what the operator
        // sees in a spreadsheet.
        let row_number = index + 2;

        match ValidatedRecord::new(record) {
            Ok(validated) => accepted.push(transform(&validated)),
            Err(record) => rejected.push(RejectedRow {
                row_number,
                rejected: record,
            }),
        }
    }

    let diagnostics = ParseDiagnostics {
        total_lines,
        parsed_lines,
        valid_lines: accepted.len(),
        skipped_lines: total_lines.saturating_sub(parsed_lines),
    };

    info!(
        total = diagnostics.total_lines,
        parsed = diagnostics.parsed_lines,
        valid = diagnostics.valid_lines,
        skipped = diagnostics.skipped_lines,
        "CSV ingest finished"
    );

    Ok(IngestReport {
        accepted,
        rejected,
        diagnostics,
    })
}
