// ============================================================
// DIAGNOSTICS & RESULT TYPES
// ============================================================
// Operator-facing summaries: what the reader managed to parse,
// which rows validation dropped, and how each submission went.

use serde::{Deserialize, Serialize};

use super::record::{RejectedRecord, SubmissionRecord};

/// Counters from one ingestion pass, used to report
/// "N lines skipped" to the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    /// Physical data lines in the input (header excluded).
    pub total_lines: usize,
    /// Logical rows the reader emitted.
    pub parsed_lines: usize,
    /// Rows that also passed validation.
    pub valid_lines: usize,
    /// Physical lines that did not survive into a parsed row.
    pub skipped_lines: usize,
}

/// A rejected row together with its position in the source file,
/// 1-based and counting the header, so it matches what the operator
/// sees in a spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRow {
    pub row_number: usize,
    #[serde(flatten)]
    pub rejected: RejectedRecord,
}

/// Everything one ingestion pass produces. The caller owns the lists
/// exclusively; nothing here is shared or mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: Vec<SubmissionRecord>,
    pub rejected: Vec<RejectedRow>,
    pub diagnostics: ParseDiagnostics,
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub conversation_name: String,
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// One snapshot in the ordered progress stream the submitter emits.
/// The pipeline itself carries no progress state; consumers render
/// these however they like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchProgress {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub current_index: usize,
    pub current: String,
    pub last_outcome: Option<BatchResult>,
}
